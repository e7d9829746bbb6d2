mod login;
pub use login::Login;

mod dashboard;
pub use dashboard::Dashboard;

mod section;
pub use section::Section;
