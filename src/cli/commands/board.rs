//! Board command - interactive milestone board

use std::sync::Arc;

use crate::api::MilestoneApi;
use crate::cli::CommandContext;
use crate::errors::Result;
use crate::tui::BoardRunner;

/// Run the board for `order_id` until the user quits
pub async fn run(api: Arc<dyn MilestoneApi>, ctx: &CommandContext, order_id: &str) -> Result<()> {
    let mut runner = BoardRunner::new(api, order_id, ctx.today, ctx.page_size);
    runner.run().await
}
