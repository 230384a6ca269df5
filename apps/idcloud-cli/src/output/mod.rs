//! Terminal output helpers

mod printer;
pub mod reporter;
pub mod table;

pub use printer::{
    print_data, print_error, print_info, print_key_value, print_success, print_warning,
};
pub use reporter::{ConsoleReporter, MessageLevel, ProgressStatus, Reporter};
pub use table::{flatten_json, render_table};
