use crate::config::Config;
use crate::display::{format_view, view_json};
use crate::error::{HerodexError, Result};
use crate::view::{LoadOutcome, retrievable_pages};

use super::{CommandOutput, load_with_splash, open_controller};

/// Print one page of the catalog
pub async fn cmd_browse(config: &Config, page: u32, output_json: bool) -> Result<()> {
    let mut controller = open_controller(config)?;
    load_with_splash(&mut controller, config, output_json).await;

    // Without page 1 there is nothing to navigate from; show the failure
    if page > 1 && !controller.state().last_fetch.is_failed() {
        match controller.change_page(page).await {
            LoadOutcome::Rejected => {
                return Err(HerodexError::InvalidInput(format!(
                    "page {page} is out of range (1-{})",
                    retrievable_pages(controller.state()).max(1)
                )));
            }
            LoadOutcome::PastEnd => {
                return Err(HerodexError::InvalidInput(format!(
                    "page {page} is past the end of the catalog (last page: {})",
                    retrievable_pages(controller.state())
                )));
            }
            _ => {}
        }
    }

    let vm = controller.view_model();
    CommandOutput::new(view_json(&vm))
        .with_text(format_view(&vm))
        .print(output_json)
}
