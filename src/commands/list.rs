use std::fs;
use std::path::Path;

use colored::Colorize;

use crate::model::ProfileRegistry;
use crate::Result as CrateResult;

/// Prints the profiles currently registered in launcher_profiles.json.
/// Read-only: a corrupt registry is reported, not reset, on this path.
pub fn list(minecraft_dir: &Path) -> CrateResult<()> {
    let path = crate::util::profiles_path(minecraft_dir);
    if !path.is_file() {
        println!("No launcher profiles registered yet.");
        return Ok(());
    }

    let registry: ProfileRegistry = serde_json::from_str(&fs::read_to_string(&path)?)?;
    if registry.profiles.is_empty() {
        println!("No launcher profiles registered yet.");
        return Ok(());
    }

    for (name, entry) in registry.profiles.iter() {
        let title_corner = boxy::Char::upper_left(boxy::Weight::Thick);
        let title_side_h = boxy::Char::horizontal(boxy::Weight::Thick).to_string();
        let title_side_v = boxy::Char::vertical(boxy::Weight::Thick);
        let title_branch = boxy::Char::right_tee(boxy::Weight::Thick).down(boxy::Weight::Normal);
        let left_branch_more_str = boxy::Char::right_tee(boxy::Weight::Normal).to_string();
        let left_branch_done_str = boxy::Char::lower_left(boxy::Weight::Normal).to_string();
        let left_node = boxy::Char::left_half(boxy::Weight::Normal);

        println!(
            "{}{}{}",
            title_corner,
            title_side_h.repeat(name.len() + 2),
            title_corner.rotate_cw(1)
        );
        println!("{} {} {}", title_side_v, name.bold(), title_side_v);
        println!(
            "{}{}{}",
            title_branch,
            title_side_h.repeat(name.len() + 2),
            title_corner.rotate_cw(2)
        );
        println!(
            "{}{}Version:  {}",
            left_branch_more_str,
            left_node,
            entry.last_version_id.green()
        );
        println!(
            "{}{}Game dir: {}",
            left_branch_done_str, left_node, entry.game_dir
        );
    }
    Ok(())
}
