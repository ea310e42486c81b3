//! League CLI
//!
//! Offline tools over the league core:
//! - draft-order: print the turn order for a draft
//! - mock-draft: run a full auto-pick draft against a catalog file
//! - waivers: mock-draft a league, then resolve a batch of waiver claims against it
//! - cutoff: show the next waiver cutoff

use chrono::{NaiveTime, Utc, Weekday};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use draft_engine::{
    generate_turn_order, simulate_draft, DraftConfig, DraftEngineConfig, DraftOrder, DraftType,
    MockDraft,
};
use league_events::MemorySink;
use player_registry::{PlayerRecord, PlayerRegistry, ProjectedPoints, RankingStrategy, WeightedForm};
use roster_store::{
    InMemoryRosterStore, LeagueId, RosterSlot, RosterStore, RosterStoreConfig, RosterTransaction,
    TeamId, TeamInfo,
};
use waiver_engine::{
    next_cutoff, ClaimRequest, ClaimStatus, ResolutionSummary, WaiverEngine, WaiverEngineConfig,
};

const CLI_LEAGUE: LeagueId = 1;

#[derive(Parser)]
#[command(name = "league-cli")]
#[command(about = "League CLI - draft orders, mock drafts and waiver simulations")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the pick-by-pick turn order
    DraftOrder {
        #[arg(short, long, default_value = "10")]
        teams: u32,

        #[arg(short, long, default_value = "15")]
        rounds: u32,

        #[arg(long, value_enum, default_value = "snake")]
        draft_type: DraftTypeArg,

        /// Shuffle seed; teams keep their numeric order when absent
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run a full mock draft where every team auto-picks
    MockDraft {
        /// Season projections JSON
        #[arg(short, long)]
        catalog: PathBuf,

        #[arg(short, long, default_value = "10")]
        teams: u32,

        /// Defaults to DRAFT_ROUNDS or 15
        #[arg(short, long)]
        rounds: Option<u32>,

        #[arg(long, value_enum, default_value = "projected")]
        ranking: RankingArg,

        /// Shuffle seed; random when absent
        #[arg(long)]
        seed: Option<u64>,

        /// Print the draft as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Mock-draft a league, then resolve waiver claims against the drafted rosters
    Waivers {
        #[arg(short, long)]
        catalog: PathBuf,

        /// JSON array of claims: {"team_id", "player_id", "bid_amount", "drop_player_id"?}
        #[arg(long)]
        claims: PathBuf,

        #[arg(short, long, default_value = "10")]
        teams: u32,

        #[arg(short, long, default_value = "13")]
        rounds: u32,

        /// Roster capacity per team; ROSTER_DEFAULT_CAPACITY or 16 when omitted
        #[arg(long)]
        capacity: Option<usize>,

        #[arg(long, default_value = "1")]
        seed: u64,
    },

    /// Show the next waiver cutoff
    Cutoff {
        #[arg(long, default_value = "Wed")]
        weekday: String,

        /// UTC time, HH:MM
        #[arg(long, default_value = "02:00")]
        time: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DraftTypeArg {
    Snake,
    Linear,
}

impl From<DraftTypeArg> for DraftType {
    fn from(arg: DraftTypeArg) -> Self {
        match arg {
            DraftTypeArg::Snake => DraftType::Snake,
            DraftTypeArg::Linear => DraftType::Linear,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum RankingArg {
    Projected,
    Form,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::DraftOrder { teams, rounds, draft_type, seed } => {
            print_draft_order(teams, rounds, draft_type.into(), seed)
        }
        Commands::MockDraft { catalog, teams, rounds, ranking, seed, json } => {
            run_mock_draft(&catalog, teams, rounds, ranking, seed, json).await
        }
        Commands::Waivers { catalog, claims, teams, rounds, capacity, seed } => {
            run_waivers(&catalog, &claims, teams, rounds, capacity, seed).await
        }
        Commands::Cutoff { weekday, time } => print_cutoff(&weekday, &time),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn create_teams(count: u32, capacity: usize) -> Vec<TeamInfo> {
    (1..=count).map(|id| TeamInfo::new(id, format!("Team {}", id), capacity)).collect()
}

fn order_for(seed: Option<u64>) -> DraftOrder {
    DraftOrder::Random { seed: Some(seed.unwrap_or_else(|| fastrand::u64(..))) }
}

async fn load_catalog(path: &Path) -> Result<PlayerRegistry, String> {
    let mut registry = PlayerRegistry::new();
    registry
        .load_from_file(path)
        .await
        .map_err(|e| format!("Failed to load catalog {}: {}", path.display(), e))?;
    Ok(registry)
}

fn print_draft_order(
    teams: u32,
    rounds: u32,
    draft_type: DraftType,
    seed: Option<u64>,
) -> Result<(), String> {
    let team_ids: Vec<TeamId> = (1..=teams).collect();
    let base = match seed {
        Some(seed) => DraftOrder::Random { seed: Some(seed) }
            .base_order(&team_ids)
            .map_err(|e| e.to_string())?,
        None => team_ids,
    };
    let turn_order = generate_turn_order(&base, rounds, draft_type);

    println!("{}", format!("Draft order ({:?}, {} rounds)", draft_type, rounds).bold());
    for (round, chunk) in turn_order.chunks(base.len().max(1)).enumerate() {
        let picks: Vec<String> = chunk.iter().map(|t| t.to_string()).collect();
        println!("  {} {}", format!("R{:>2}:", round + 1).cyan(), picks.join(" "));
    }
    Ok(())
}

async fn run_mock_draft(
    catalog: &Path,
    teams: u32,
    rounds: Option<u32>,
    ranking: RankingArg,
    seed: Option<u64>,
    json: bool,
) -> Result<(), String> {
    let registry = load_catalog(catalog).await?;
    let engine_config = DraftEngineConfig::from_env();
    let config = DraftConfig {
        rounds: rounds.unwrap_or(engine_config.defaults.rounds),
        is_mock: true,
        ..engine_config.defaults.clone()
    };
    let ranking: Box<dyn RankingStrategy> = match ranking {
        RankingArg::Projected => Box::new(ProjectedPoints),
        RankingArg::Form => Box::new(WeightedForm),
    };

    let draft = simulate_draft(
        &create_teams(teams, config.rounds as usize),
        &config,
        &order_for(seed),
        registry.get_top_players(registry.len()),
        ranking.as_ref(),
        &engine_config.position_caps,
    )
    .map_err(|e| e.to_string())?;

    if json {
        let rendered = serde_json::to_string_pretty(&draft).map_err(|e| e.to_string())?;
        println!("{}", rendered);
    } else {
        print_mock_draft(&draft);
    }
    Ok(())
}

fn print_mock_draft(draft: &MockDraft) {
    println!("{}", "Mock draft".bold());
    println!("Base order: {:?}", draft.base_order);
    let mut current_round = 0;
    for pick in &draft.picks {
        if pick.round != current_round {
            current_round = pick.round;
            println!("{}", format!("-- Round {} --", current_round).yellow());
        }
        println!(
            "  {:>4}  {:<10} {}",
            pick.pick_number,
            pick.team_name.cyan(),
            pick.player.label()
        );
    }
    println!("{} picks made", draft.picks.len().to_string().green());
}

async fn run_waivers(
    catalog: &Path,
    claims_path: &Path,
    teams: u32,
    rounds: u32,
    capacity: Option<usize>,
    seed: u64,
) -> Result<(), String> {
    let capacity = capacity.unwrap_or_else(|| RosterStoreConfig::from_env().default_capacity);
    let registry = Arc::new(load_catalog(catalog).await?);
    let content = std::fs::read_to_string(claims_path)
        .map_err(|e| format!("Failed to read claims {}: {}", claims_path.display(), e))?;
    let requests: Vec<ClaimRequest> =
        serde_json::from_str(&content).map_err(|e| format!("Invalid claims file: {}", e))?;

    // Draft first so the waiver wire reflects a realistic league
    let team_infos = create_teams(teams, capacity);
    let config = DraftConfig { rounds, is_mock: true, ..DraftConfig::default() };
    let draft = simulate_draft(
        &team_infos,
        &config,
        &order_for(Some(seed)),
        registry.get_top_players(registry.len()),
        &ProjectedPoints,
        &DraftEngineConfig::default().position_caps,
    )
    .map_err(|e| e.to_string())?;

    let store = Arc::new(InMemoryRosterStore::new());
    store.register_league(CLI_LEAGUE, team_infos).await.map_err(|e| e.to_string())?;
    let drafted = draft.picks.iter().fold(RosterTransaction::new(CLI_LEAGUE), |tx, pick| {
        tx.add(pick.team_id, pick.player.player_id, RosterSlot::Bench)
    });
    store.commit(drafted).await.map_err(|e| e.to_string())?;

    let sink = Arc::new(MemorySink::new());
    let engine = WaiverEngine::new(
        WaiverEngineConfig::from_env(),
        registry.clone(),
        store,
        sink.clone(),
    );
    let order = engine.initialize_league(CLI_LEAGUE, None).await.map_err(|e| e.to_string())?;
    println!("Waiver order: {:?}", order);

    for request in requests {
        match engine.submit_claim(CLI_LEAGUE, request.clone()).await {
            Ok(claim) => println!(
                "  {} team {} -> player {} (${}, priority {})",
                "queued".green(),
                claim.team_id,
                claim.player_id,
                claim.bid_amount,
                claim.priority
            ),
            Err(e) => println!(
                "  {} team {} -> player {}: {}",
                "rejected".red(),
                request.team_id,
                request.player_id,
                e
            ),
        }
    }

    let summary = engine.resolve(CLI_LEAGUE).await.map_err(|e| e.to_string())?;
    print_resolution(&summary, &registry);
    println!("{} events published", sink.events().len());
    Ok(())
}

fn print_resolution(summary: &ResolutionSummary, registry: &PlayerRegistry) {
    println!(
        "{}",
        format!(
            "Resolution: {} processed, {} successful, {} failed",
            summary.processed, summary.successful, summary.failed
        )
        .bold()
    );
    for outcome in &summary.outcomes {
        let player = registry
            .get_by_id(outcome.player_id)
            .map(PlayerRecord::label)
            .unwrap_or_else(|| outcome.player_id.to_string());
        let status = match outcome.status {
            ClaimStatus::Successful => outcome.status.to_string().green(),
            _ => outcome.status.to_string().red(),
        };
        match &outcome.failure_reason {
            Some(reason) => {
                println!("  team {:>2} {:<40} {} ({:?})", outcome.team_id, player, status, reason)
            }
            None => println!("  team {:>2} {:<40} {}", outcome.team_id, player, status),
        }
    }
    if !summary.priority_order.is_empty() {
        println!("New waiver order: {:?}", summary.priority_order);
    }
}

fn print_cutoff(weekday: &str, time: &str) -> Result<(), String> {
    let weekday: Weekday = weekday.parse().map_err(|_| format!("invalid weekday: {}", weekday))?;
    let time = NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| format!("invalid cutoff time (expected HH:MM): {}", time))?;

    let now = Utc::now();
    let next = next_cutoff(now, weekday, time);
    let remaining = next - now;
    println!(
        "Next waiver cutoff: {} ({}h {}m from now)",
        next.to_rfc3339().cyan(),
        remaining.num_hours(),
        remaining.num_minutes() % 60
    );
    Ok(())
}
