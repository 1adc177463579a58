pub mod api;
pub mod cli;
pub mod codec;
pub mod config;
pub mod domain;
pub mod feed;
pub mod http;
pub mod normalize;
pub mod services;
pub mod store;
pub mod view;

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use crate::api::status_client::StatusClient;
use crate::cli::{confirm, Cli, Command};
use crate::config::settings::{database_path, default_status_host, AppConfig};
use crate::feed::ChangeFeed;
use crate::services::editor::{EditorService, RecordPatch};
use crate::services::server::ServerService;
use crate::services::viewer::{self, ViewerService};
use crate::services::watch::WatchService;
use crate::store::BoardStore;
use crate::view::ViewQuery;

pub fn interpret() -> Command {
    Cli::parse().command
}

fn open_store() -> Result<BoardStore> {
    BoardStore::open(&database_path(), ChangeFeed::new())
}

pub fn handle_list(
    search: Option<String>,
    tier: Option<String>,
    sort_by: Option<String>,
    order: Option<String>,
) -> Result<()> {
    let viewer = ViewerService::new(open_store()?);
    let query = ViewQuery::from_params(
        search.as_deref(),
        tier.as_deref(),
        sort_by.as_deref(),
        order.as_deref(),
    );
    print!("{}", viewer.render_board(&query)?);
    Ok(())
}

pub fn handle_watch(
    search: Option<String>,
    tier: Option<String>,
    sort_by: Option<String>,
    order: Option<String>,
    host: Option<String>,
) -> Result<()> {
    let query = ViewQuery::from_params(
        search.as_deref(),
        tier.as_deref(),
        sort_by.as_deref(),
        order.as_deref(),
    );
    let host = host.unwrap_or_else(default_status_host);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = WatchService::new(open_store()?, AppConfig::new());
        service.run(query, host).await
    })
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = ServerService::new(port, AppConfig::new());
        service.run().await
    })
}

pub fn handle_mapping() -> Result<()> {
    let viewer = ViewerService::new(open_store()?);
    print!("{}", viewer.render_mapping()?);
    Ok(())
}

pub fn handle_add(
    name: String,
    tier: String,
    points: Option<i64>,
    rank: Option<i64>,
) -> Result<()> {
    let editor = EditorService::new(open_store()?);
    let record = editor.add_player(&name, &tier, points, rank)?;
    println!(
        "Added {} ({}, {} points)",
        record.name, record.tier, record.points
    );
    Ok(())
}

pub fn handle_edit(
    index: usize,
    name: Option<String>,
    tier: Option<String>,
    points: Option<i64>,
    rank: Option<i64>,
) -> Result<()> {
    let editor = EditorService::new(open_store()?);
    let patch = RecordPatch {
        name,
        tier,
        points,
        rank,
    };
    let record = editor.edit_player(index, patch)?;
    println!(
        "Updated {} ({}, {} points)",
        record.name, record.tier, record.points
    );
    Ok(())
}

pub fn handle_delete(index: usize, yes: bool) -> Result<()> {
    if !confirm(&format!("Delete the player at position {index}?"), yes)? {
        println!("Aborted.");
        return Ok(());
    }

    let editor = EditorService::new(open_store()?);
    let removed = editor.delete_player(index)?;
    println!("Deleted {}", removed.name);
    Ok(())
}

pub fn handle_clear(yes: bool) -> Result<()> {
    if !confirm("Remove every player from the board?", yes)? {
        println!("Aborted.");
        return Ok(());
    }

    let editor = EditorService::new(open_store()?);
    editor.clear()?;
    println!("Board cleared.");
    Ok(())
}

pub fn handle_set_tier(label: String, points: i64) -> Result<()> {
    let editor = EditorService::new(open_store()?);
    editor.set_tier_points(&label, points)?;
    println!("Mapping updated: {} → {points}", label.trim());
    Ok(())
}

pub fn handle_apply_mapping(empty_only: bool, yes: bool) -> Result<()> {
    let message = if empty_only {
        "Fill empty player points from the mapping?"
    } else {
        "Overwrite every player's points from the mapping?"
    };
    if !confirm(message, yes)? {
        println!("Aborted.");
        return Ok(());
    }

    let editor = EditorService::new(open_store()?);
    let updated = editor.apply_mapping(empty_only)?;
    println!("Updated {updated} player(s).");
    Ok(())
}

pub fn handle_import(path: PathBuf) -> Result<()> {
    let editor = EditorService::new(open_store()?);
    let count = editor.import_file(&path)?;
    println!("Imported {count} player(s).");
    Ok(())
}

pub fn handle_export(path: Option<PathBuf>) -> Result<()> {
    let path = path.unwrap_or_else(|| PathBuf::from("players.json"));
    let editor = EditorService::new(open_store()?);
    let count = editor.export_file(&path)?;
    println!("Exported {count} player(s) to {}.", path.display());
    Ok(())
}

pub fn handle_status(host: Option<String>) -> Result<()> {
    let host = host.unwrap_or_else(default_status_host);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let mut client = StatusClient::new(&AppConfig::new().status)?;
        let report = client.fetch(&host).await;
        println!("{}", viewer::render_status(&report));
        Ok(())
    })
}

pub fn handle_completions(shell: clap_complete::Shell) -> Result<()> {
    let mut command = Cli::command();
    clap_complete::generate(shell, &mut command, "tierboard", &mut std::io::stdout());
    Ok(())
}
