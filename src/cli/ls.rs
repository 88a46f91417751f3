//! Project listing.

use anyhow::Result;
use console::style;

use crate::store::list_projects;
use crate::utils::paths::Workspace;
use crate::utils::ui;

pub fn run(workspace: &Workspace) -> Result<()> {
    let projects = list_projects(workspace)?;

    if projects.is_empty() {
        println!();
        ui::info(&format!("no projects yet; use {} to create one", ui::accent("pj new")));
        println!();
        return Ok(());
    }

    println!();
    println!(
        "  {} {}",
        ui::accent("projects"),
        style(format!("({})", projects.len())).dim()
    );
    println!("  {}", style("─".repeat(24)).dim());
    println!();

    for project in &projects {
        let tag = match &project.template {
            Some(template) => style(format!("[{template}]")).cyan().to_string(),
            None => style("[empty]").dim().to_string(),
        };
        println!(
            "  {} {} {}  {}",
            style("◆").color256(214),
            style(&project.name).bold(),
            tag,
            style(ui::format_relative_time(project.modified_at)).dim()
        );
        println!("    {}", style(project.path.display()).dim());
        println!();
    }

    println!("  {}", style("use `pj open` to open a project").dim());
    println!();
    Ok(())
}
