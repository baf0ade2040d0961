use super::{assemble_layout, report_unplaced};
use crate::cli::ShowArgs;
use crate::error::Result;
use crate::ui::UiEvent;
use crate::utils::palette::Palette;
use crate::utils::render::{self, Pager};
use tokio::sync::mpsc;
use tracing::{info, warn};

pub async fn run(args: ShowArgs, ui_sender: mpsc::Sender<UiEvent>) -> Result<()> {
    let layout = assemble_layout(&args.layout, ui_sender)?;
    report_unplaced(&layout);

    let mut pager = Pager::new(&layout);
    if pager.is_empty() {
        warn!("Assembly produced no occupied plates.");
        println!("No plate holds any wells.");
        return Ok(());
    }

    let requested = args.page.saturating_sub(1);
    pager.go_to(requested);
    if pager.current() != requested {
        info!(
            requested = args.page,
            shown = pager.current() + 1,
            "Requested page out of range; clamped."
        );
    }

    if let Some(plate) = pager.plate() {
        let mut palette = Palette::new();
        println!("{}\n", pager.title());
        print!("{}", render::plate_grid(&layout, plate, &mut palette));
        if pager.len() > 1 {
            println!(
                "\nPage {} of {} occupied plate(s). Use --page to switch.",
                pager.current() + 1,
                pager.len()
            );
        }
    }

    Ok(())
}
