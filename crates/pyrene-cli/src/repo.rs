use std::collections::BTreeMap;

use nu_ansi_term::Color::{Blue, Cyan, Green, Red, Yellow};
use pyrene_config::{
    manager::RepoManager,
    repos::PackageRepo,
    repository::{RepoType, KEY_PASSWORD, KEY_TYPE, REPO_ATTRIBUTES},
};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::{
    error::{CliError, CliResult},
    utils::{mask_secret, parse_assignment, render_table, Colored},
};

#[derive(Debug, Serialize)]
struct RepoSummary {
    name: String,
    #[serde(rename = "type")]
    repo_type: Option<String>,
    location: Option<String>,
    error: Option<String>,
}

fn summarize(manager: &RepoManager, name: &str) -> RepoSummary {
    let repo_type = manager
        .get_attributes(name)
        .ok()
        .and_then(|attributes| attributes.get(KEY_TYPE).cloned());

    match manager.get_repo(name) {
        Ok(repo) => RepoSummary {
            name: name.to_string(),
            repo_type,
            location: Some(repo.location()),
            error: None,
        },
        Err(err) => RepoSummary {
            name: name.to_string(),
            repo_type,
            location: None,
            error: Some(err.to_string()),
        },
    }
}

pub fn define_repos(manager: &mut RepoManager, names: &[String]) -> CliResult<()> {
    for name in names {
        manager.define(name)?;
    }
    Ok(())
}

pub fn forget_repos(manager: &mut RepoManager, names: &[String]) -> CliResult<()> {
    for name in names {
        if !manager.forget(name)? {
            warn!("Repository '{}' is not defined", name);
        }
    }
    Ok(())
}

pub fn set_attributes(
    manager: &mut RepoManager,
    name: &str,
    assignments: &[String],
) -> CliResult<()> {
    // Reject malformed input before anything is written.
    let parsed = assignments
        .iter()
        .map(|arg| parse_assignment(arg))
        .collect::<CliResult<Vec<_>>>()?;

    for (key, value) in parsed {
        manager.set(name, key, value)?;
        info!(
            "{} {}.{}",
            Colored(Green, "Set"),
            Colored(Blue, name),
            Colored(Cyan, key)
        );
    }
    Ok(())
}

pub fn show_repo(
    manager: &RepoManager,
    name: &str,
    show_password: bool,
    json: bool,
) -> CliResult<()> {
    let attributes: BTreeMap<String, String> = manager
        .get_attributes(name)?
        .into_iter()
        .map(|(key, value)| {
            if key == KEY_PASSWORD && !show_password {
                let masked = mask_secret(&value);
                (key, masked)
            } else {
                (key, value)
            }
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&attributes)?);
        return Ok(());
    }

    if attributes.is_empty() {
        info!("Repository '{}' has no attributes", name);
        return Ok(());
    }

    let table = render_table(
        &format!("repo:{name}"),
        attributes
            .into_iter()
            .map(|(key, value)| [format!("{}", Colored(Cyan, key)), value]),
    );
    info!("\n{table}");
    Ok(())
}

pub fn list_repos(manager: &RepoManager, json: bool) -> CliResult<()> {
    let summaries: Vec<RepoSummary> = manager
        .repo_names()
        .iter()
        .map(|name| summarize(manager, name))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    if summaries.is_empty() {
        info!(
            "No repositories defined in {}",
            manager.path().display()
        );
        return Ok(());
    }

    let header = ["Name", "Type", "Location"].map(String::from);
    let rows = summaries.into_iter().map(|summary| {
        let location = match (summary.location, summary.error) {
            (Some(location), _) => location,
            (None, Some(error)) => format!("{}", Colored(Red, error)),
            (None, None) => String::new(),
        };
        [
            format!("{}", Colored(Blue, summary.name)),
            summary.repo_type.unwrap_or_else(|| "-".to_string()),
            location,
        ]
    });

    let table = render_table("Repositories", std::iter::once(header).chain(rows));
    info!("\n{table}");
    Ok(())
}

pub fn check_repos(manager: &RepoManager, names: &[String], json: bool) -> CliResult<()> {
    let names = if names.is_empty() {
        manager.repo_names()
    } else {
        names.to_vec()
    };

    let summaries: Vec<RepoSummary> = names
        .iter()
        .map(|name| summarize(manager, name))
        .collect();
    let failed = summaries.iter().filter(|s| s.error.is_some()).count();

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        for summary in &summaries {
            match &summary.error {
                None => info!(
                    "{} {} ({}) {}",
                    Colored(Green, "ok"),
                    Colored(Blue, &summary.name),
                    summary.repo_type.as_deref().unwrap_or_default(),
                    summary.location.as_deref().unwrap_or_default()
                ),
                Some(err) => error!("{}: {}", Colored(Blue, &summary.name), err),
            }
        }
    }

    if failed > 0 {
        return Err(CliError::CheckFailed(failed, summaries.len()));
    }
    Ok(())
}

pub fn list_types(json: bool) -> CliResult<()> {
    if json {
        let types: BTreeMap<&str, &[&str]> = RepoType::ALL
            .iter()
            .map(|repo_type| (repo_type.as_str(), repo_type.required_attributes()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&types)?);
        return Ok(());
    }

    let type_rows = RepoType::ALL.iter().map(|repo_type| {
        [
            format!("{}", Colored(Blue, repo_type)),
            repo_type.required_attributes().join(", "),
        ]
    });
    let header = ["Type", "Requires"].map(String::from);
    info!(
        "\n{}",
        render_table("Repository types", std::iter::once(header).chain(type_rows))
    );

    let attribute_rows = REPO_ATTRIBUTES
        .iter()
        .map(|(key, description)| [format!("{}", Colored(Yellow, key)), description.to_string()]);
    info!("\n{}", render_table("Attributes", attribute_rows));
    Ok(())
}
