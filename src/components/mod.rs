//! UI Components
//!
//! Reusable Leptos components.

mod advisor_view;
mod back_button;
mod dashboard;
mod delete_confirm_button;
mod draft_input;
mod log_panel;
mod login_card;
mod main_menu;
mod property_card;
mod property_form;
mod property_list;
mod recommendation_modal;
mod toast;
mod tooltip;

pub use advisor_view::AdvisorView;
pub use back_button::BackButton;
pub use dashboard::Dashboard;
pub use delete_confirm_button::DeleteConfirmButton;
pub use draft_input::DraftInput;
pub use log_panel::LogPanel;
pub use login_card::LoginCard;
pub use main_menu::MainMenu;
pub use property_card::PropertyCard;
pub use property_form::PropertyForm;
pub use property_list::PropertyList;
pub use recommendation_modal::RecommendationModal;
pub use toast::ToastView;
pub use tooltip::Tooltip;
