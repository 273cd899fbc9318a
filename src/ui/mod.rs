mod progress;
mod spinner;
mod style;

pub use progress::SpinnerObserver;
pub use spinner::Spinner;
pub use style::Style;
