use crate::catalog::CharacterId;
use crate::config::Config;
use crate::display::{CharacterFormatter, detail_json};
use crate::error::{HerodexError, Result};

use super::{CommandOutput, open_controller};

/// Display one character in detail
pub async fn cmd_show(config: &Config, id: CharacterId, output_json: bool) -> Result<()> {
    let mut controller = open_controller(config)?;
    controller.show_item(id).await?;

    let vm = controller.view_model();
    let detail = vm.detail.ok_or(HerodexError::CharacterNotFound(id.0))?;
    CommandOutput::new(detail_json(&detail))
        .with_text(CharacterFormatter::format_detail(&detail, &vm.palette))
        .print(output_json)
}
