mod home;
mod module;
mod quiz;
mod state;
mod toasts;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use home::HomeView;
pub use module::ModuleView;
pub use quiz::QuizView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use toasts::ToastHost;
