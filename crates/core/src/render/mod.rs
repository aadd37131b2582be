mod gwei;
pub use gwei::{format_gwei, RenderError, WEI_PER_GWEI};

mod labels;
pub use labels::{GasFeeDisplay, PriorityLabels, PriorityLabelsError, PriorityRow};

mod page;
pub use page::{render_error_page, render_page};
