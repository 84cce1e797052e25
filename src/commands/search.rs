use crate::config::Config;
use crate::display::{format_view, view_json};
use crate::error::{HerodexError, Result};
use crate::view::LoadOutcome;

use super::{CommandOutput, open_controller};

/// Search characters by name prefix
pub async fn cmd_search(config: &Config, text: &str, output_json: bool) -> Result<()> {
    let mut controller = open_controller(config)?;
    if controller.submit_search(text).await == LoadOutcome::Rejected {
        return Err(HerodexError::InvalidInput(
            "search text cannot be empty".to_string(),
        ));
    }

    let vm = controller.view_model();
    CommandOutput::new(view_json(&vm))
        .with_text(format_view(&vm))
        .print(output_json)
}
