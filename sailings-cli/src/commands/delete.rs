use anyhow::Result;
use owo_colors::OwoColorize;
use sailings_core::EntryId;

pub async fn run(id: &str) -> Result<()> {
    let id = EntryId::parse(id);
    let mut board = super::open_board()?;

    if board.delete(&id).await? {
        println!("{} {}", "Deleted".red(), id);
    } else {
        println!("{}", format!("Nothing stored under {id}").dimmed());
    }
    Ok(())
}
