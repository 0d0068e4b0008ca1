//! Headless court simulation
//!
//! Generates a seeded roster, runs maintenance ticks, and reports how the
//! throne and the city changed hands.

use std::path::PathBuf;

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use royal_court::core::error::Result;
use royal_court::core::types::{CharacterId, Sex};
use royal_court::core::ChallengeConfig;
use royal_court::court::{
    advance_day, controlling_team, ChallengeOrchestrator, Chronicle, CityActivity, ThroneActivity,
};
use royal_court::realm::{Character, MonsterGuard, Realm};

/// Run autonomous throne and city challenges for a number of days
#[derive(Parser, Debug)]
#[command(name = "court_sim")]
#[command(about = "Simulate throne and city politics over maintenance ticks")]
struct Args {
    /// Number of maintenance ticks to run
    #[arg(long, default_value_t = 365)]
    ticks: u32,

    /// Random seed for deterministic runs
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of characters to generate
    #[arg(long, default_value_t = 60)]
    population: u32,

    /// TOML file overriding challenge tunables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the chronicle as JSON to this path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Serialize)]
struct SimulationOutput<'a> {
    seed: u64,
    ticks: u32,
    usurpations: u32,
    city_changes: u32,
    final_ruler: Option<String>,
    final_controller: Option<String>,
    chronicle: &'a Chronicle,
}

const TEAM_NAMES: [&str; 5] = ["Red Daggers", "Iron Fist", "Night Owls", "Grey Wolves", "Ashen Hand"];

fn generate_realm(population: u32, rng: &mut ChaCha8Rng) -> Realm {
    let mut realm = Realm::new();
    for i in 0..population {
        let mut c = Character::new(CharacterId(0), format!("Citizen {}", i + 1));
        c.sex = if rng.gen_bool(0.5) { Sex::Male } else { Sex::Female };
        c.level = rng.gen_range(1..=40);
        c.strength = rng.gen_range(10..=120);
        c.defence = rng.gen_range(5..=80);
        c.weapon_power = rng.gen_range(0..=60);
        c.armor_power = rng.gen_range(0..=40);
        c.charisma = rng.gen_range(5..=60);
        c.max_hp = 100 + c.level as i64 * rng.gen_range(20..=60);
        c.hp = c.max_hp;
        c.ambition = rng.gen_range(0.0..=1.0);
        c.reserved = rng.gen_bool(0.05);
        if rng.gen_bool(0.6) {
            c.team = TEAM_NAMES[rng.gen_range(0..TEAM_NAMES.len())].to_string();
        }
        realm.spawn(c);
    }
    realm
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("royal_court=info,court_sim=info")
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => ChallengeConfig::load(path)?,
        None => ChallengeConfig::default(),
    };

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut realm = generate_realm(args.population, &mut rng);
    let mut orchestrator = ChallengeOrchestrator::new(config, rng);
    let mut chronicle = Chronicle::new();

    tracing::info!(seed = args.seed, population = args.population, "starting court simulation");

    let mut usurpations = 0;
    let mut city_changes = 0;
    for _ in 0..args.ticks {
        chronicle.day = realm.day;
        let report = orchestrator.process_maintenance_challenges(&mut realm, &mut chronicle);

        match report.throne {
            ThroneActivity::Usurped(_) => usurpations += 1,
            ThroneActivity::Claimed(_) => {
                // A claimant staffs the empty castle before anyone can challenge
                if let Some(office) = realm.office.as_mut() {
                    office.add_monster_guard(MonsterGuard {
                        name: "Cave Troll".into(),
                        hp: 400,
                        strength: 70,
                        defence: 30,
                        weapon_power: 20,
                    });
                    office.hire_guard("Sir Edwin", 150);
                    office.hire_guard("Sir Osric", 150);
                }
            }
            _ => {}
        }
        if matches!(report.city, CityActivity::Taken(_)) {
            city_changes += 1;
        }

        if let Err(e) = realm.check_invariants() {
            tracing::error!(error = %e, day = realm.day, "court invariants broken");
        }
        advance_day(&mut realm, &mut chronicle);
    }

    let final_ruler = realm
        .office
        .as_ref()
        .map(|o| format!("{} {} ({} days)", o.title(), o.ruler_name, o.days_in_power));
    let final_controller = controlling_team(&realm).map(str::to_string);

    println!("Court Simulation");
    println!("================");
    println!("Days simulated:   {}", args.ticks);
    println!("Usurpations:      {}", usurpations);
    println!("City changes:     {}", city_changes);
    println!("News items:       {}", chronicle.len());
    println!("Ruler:            {}", final_ruler.as_deref().unwrap_or("(empty throne)"));
    println!("City held by:     {}", final_controller.as_deref().unwrap_or("(nobody)"));

    if let Some(path) = &args.output {
        let output = SimulationOutput {
            seed: args.seed,
            ticks: args.ticks,
            usurpations,
            city_changes,
            final_ruler,
            final_controller,
            chronicle: &chronicle,
        };
        std::fs::write(path, serde_json::to_string_pretty(&output)?)?;
        println!("\nChronicle written to {}", path.display());
    }

    Ok(())
}
