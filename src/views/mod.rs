pub mod chat;
pub mod panels;
pub mod settings;
pub mod shared;

pub use chat::ChatView;
pub use panels::{AboutPanel, HelpPanel, SummaryModal};
pub use settings::PreferencesMenu;
