use std::path::PathBuf;

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

// ---------------------------------------------------------------------------
// Dialog seam
// ---------------------------------------------------------------------------

/// The blocking dialogs a prediction run needs. The controller only talks to
/// this trait, so it can be driven without a display.
pub trait Dialogs {
    /// File-open dialog. `None` when the user cancels.
    fn pick_file(&mut self) -> Option<PathBuf>;

    /// Yes/no question: does the file start with a header row?
    fn confirm_header(&mut self) -> bool;

    /// Acknowledge-only error box.
    fn show_error(&mut self, message: &str);

    /// Acknowledge-only information box.
    fn show_info(&mut self, title: &str, message: &str);
}

// ---------------------------------------------------------------------------
// Native dialogs (rfd)
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct NativeDialogs;

impl Dialogs for NativeDialogs {
    fn pick_file(&mut self) -> Option<PathBuf> {
        FileDialog::new()
            .set_title("Open transaction data")
            .add_filter("CSV", &["csv", "CSV"])
            .add_filter("All files", &["*"])
            .pick_file()
    }

    fn confirm_header(&mut self) -> bool {
        let answer = MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title("Header in file")
            .set_description("Does the file contain a header row?")
            .set_buttons(MessageButtons::YesNo)
            .show();
        answer == MessageDialogResult::Yes
    }

    fn show_error(&mut self, message: &str) {
        MessageDialog::new()
            .set_level(MessageLevel::Error)
            .set_title("Error")
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }

    fn show_info(&mut self, title: &str, message: &str) {
        MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}
