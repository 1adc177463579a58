use anyhow::Result;

use tierboard::cli::Command;

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = tierboard::interpret();
    execute_command(command)
}

fn execute_command(command: Command) -> Result<()> {
    match command {
        Command::List {
            search,
            tier,
            sort_by,
            order,
        } => tierboard::handle_list(search, tier, sort_by, order),
        Command::Watch {
            search,
            tier,
            sort_by,
            order,
            host,
        } => tierboard::handle_watch(search, tier, sort_by, order, host),
        Command::Serve { port } => tierboard::handle_serve(port),
        Command::Mapping => tierboard::handle_mapping(),
        Command::Add {
            name,
            tier,
            points,
            rank,
        } => tierboard::handle_add(name, tier, points, rank),
        Command::Edit {
            index,
            name,
            tier,
            points,
            rank,
        } => tierboard::handle_edit(index, name, tier, points, rank),
        Command::Delete { index, yes } => tierboard::handle_delete(index, yes),
        Command::Clear { yes } => tierboard::handle_clear(yes),
        Command::SetTier { label, points } => tierboard::handle_set_tier(label, points),
        Command::ApplyMapping { empty_only, yes } => {
            tierboard::handle_apply_mapping(empty_only, yes)
        }
        Command::Import { path } => tierboard::handle_import(path),
        Command::Export { path } => tierboard::handle_export(path),
        Command::Status { host } => tierboard::handle_status(host),
        Command::Completions { shell } => tierboard::handle_completions(shell),
    }
}
