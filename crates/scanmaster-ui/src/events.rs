use std::io::{self, Write};

use scanmaster_types::{AppEvent, DisplaySnapshot, ImageOrigin, Notice, OnboardingStep};

use crate::state::{UiScreen, UiState};

const TITLE: &str = "ScanMaster";

/// Draw one app event. Returns false once the app asked the UI to stop
pub fn handle_events(event: AppEvent, state: &mut UiState, out: &mut impl Write) -> io::Result<bool> {
    match event {
        AppEvent::BackendReady => {
            tracing::debug!("[UI] Backend ready");
            writeln!(out, "{TITLE} ready. Type 'help' for commands.")?;
        }
        AppEvent::ShowOnboardingStep { index, total, step } => {
            state.screen = UiScreen::Onboarding;
            state.on_last_step = index + 1 == total;
            render_onboarding(out, index, total, &step)?;
        }
        AppEvent::ShowCapture(snapshot) => {
            state.screen = UiScreen::Capture;
            render_capture(out, &snapshot)?;
            state.last_snapshot = Some(snapshot);
        }
        AppEvent::Notice(notice) => {
            state.notices_shown += 1;
            render_notice(out, notice)?;
        }
        AppEvent::Shutdown => {
            writeln!(out, "Bye.")?;
            out.flush()?;
            return Ok(false);
        }
        _ => {}
    }

    out.flush()?;
    Ok(true)
}

pub fn render_onboarding(
    out: &mut impl Write,
    index: usize,
    total: usize,
    step: &OnboardingStep,
) -> io::Result<()> {
    let accent = step
        .accent_rgb()
        .map(|(r, g, b)| format!("\x1b[48;2;{r};{g};{b}m  \x1b[0m "))
        .unwrap_or_default();

    writeln!(out)?;
    writeln!(out, "{accent}[{}/{}] {}", index + 1, total, step.title)?;
    writeln!(out, "    {}", step.body)?;
    writeln!(out, "    {}", step.summary)?;
    writeln!(out, "    ({})", step.illustration)?;

    if index + 1 < total {
        writeln!(out, "  next | back | finish: Finish Tutorial")?;
    } else {
        writeln!(out, "  back | finish: Finish Tutorial")?;
    }
    Ok(())
}

pub fn render_capture(out: &mut impl Write, snapshot: &DisplaySnapshot) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "== {TITLE} == Capture and Detect Text")?;

    if let Some(image) = snapshot.image {
        let origin = match image.origin {
            ImageOrigin::Camera => "camera",
            ImageOrigin::Gallery => "gallery",
        };
        writeln!(out, "[image {}x{} from {}]", image.width, image.height, origin)?;
    }

    writeln!(out, "+{}", "-".repeat(40))?;
    if snapshot.text.is_empty() {
        writeln!(out, "| (no text found)")?;
    } else {
        for line in snapshot.text.lines() {
            writeln!(out, "| {line}")?;
        }
    }
    writeln!(out, "+{}", "-".repeat(40))?;

    if snapshot.pending {
        writeln!(out, "Recognizing...")?;
    }

    writeln!(out, "{}", controls_line(snapshot))?;
    Ok(())
}

fn controls_line(snapshot: &DisplaySnapshot) -> String {
    let controls = snapshot.controls;
    let mut labels = Vec::new();
    if controls.erase {
        labels.push("erase");
    }
    if controls.camera {
        labels.push("camera");
    }
    if controls.gallery {
        labels.push("gallery <path>");
    }
    if controls.copy {
        labels.push("copy");
    }
    labels.push("quit");
    labels.join(" | ")
}

pub fn render_notice(out: &mut impl Write, notice: Notice) -> io::Result<()> {
    let marker = if notice.is_error() { "!" } else { "*" };
    writeln!(out, "{marker} {notice}")
}

#[cfg(test)]
mod tests {
    use scanmaster_types::{Controls, ImageSummary};

    use super::*;

    fn snapshot(text: &str) -> DisplaySnapshot {
        DisplaySnapshot {
            text: text.to_string(),
            is_placeholder: false,
            image: None,
            controls: Controls {
                camera: true,
                gallery: false,
                copy: true,
                erase: true,
                image: true,
            },
            pending: false,
        }
    }

    fn render(event: AppEvent, state: &mut UiState) -> (bool, String) {
        let mut out = Vec::new();
        let keep_going = handle_events(event, state, &mut out).unwrap();
        (keep_going, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_capture_screen_shows_text_and_controls() {
        let mut state = UiState::new();
        let mut snap = snapshot("STOP\nAHEAD");
        snap.image = Some(ImageSummary {
            width: 640,
            height: 480,
            origin: ImageOrigin::Camera,
        });

        let (keep_going, text) = render(AppEvent::ShowCapture(snap), &mut state);
        assert!(keep_going);
        assert_eq!(state.screen, UiScreen::Capture);
        assert!(text.contains("| STOP\n| AHEAD"));
        assert!(text.contains("[image 640x480 from camera]"));
        assert!(text.contains("erase | camera | copy | quit"));
        assert!(!text.contains("gallery"));
        assert!(state.controls().is_some());
    }

    #[test]
    fn test_empty_result_is_labelled() {
        let mut state = UiState::new();
        let (_, text) = render(AppEvent::ShowCapture(snapshot("")), &mut state);
        assert!(text.contains("(no text found)"));
    }

    #[test]
    fn test_notice_and_shutdown() {
        let mut state = UiState::new();
        let (_, text) = render(AppEvent::Notice(Notice::RecognitionFailed), &mut state);
        assert_eq!(text, "! Text detection failed\n");
        assert_eq!(state.notices_shown, 1);

        let (keep_going, _) = render(AppEvent::Shutdown, &mut state);
        assert!(!keep_going);
    }

    #[test]
    fn test_last_onboarding_step_offers_finish_only() {
        let mut state = UiState::new();
        let step = OnboardingStep {
            title: "This is header",
            body: "body",
            summary: "summary",
            illustration: "scan_document",
            accent: "#264653",
        };
        let (_, text) = render(
            AppEvent::ShowOnboardingStep {
                index: 2,
                total: 3,
                step,
            },
            &mut state,
        );
        assert!(state.on_last_step);
        assert!(text.contains("[3/3] This is header"));
        assert!(text.contains("back | finish: Finish Tutorial"));
        assert!(!text.contains("next"));
    }
}
