pub mod clipboard;
pub mod error;
pub mod navigation;
pub mod onboarding;
pub mod recognition;
pub mod state;
