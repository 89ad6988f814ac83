pub mod app;
pub mod selector_screen;
pub mod call_screen;
pub mod call_status;
pub mod call_control_state;
pub mod call_control_buttons;
pub mod title_banner;

pub use app::App;
pub use selector_screen::SelectorScreen;
pub use call_screen::CallScreen;
pub use call_status::CallStatus;
pub use call_control_buttons::CallControlButtons;
pub use title_banner::TitleBanner;
