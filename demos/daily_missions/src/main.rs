//! Daily Missions Demo
//!
//! Walks a child through a few days of missions: stars are earned, the pet
//! grows, and a hat gets bought and worn. Pass a RON config path as the
//! first argument to use an on-disk database.

use chrono::NaiveDate;
use starpet_core::{pet, registry, FixedClock, ItemSlot, MissionCategory, MissionDraft};
use starpet_db::NativeDbStore;
use starpet_engine::{EngineConfig, ProgressionStore};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "starpet_engine=info,starpet_db=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Starpet Daily Missions Demo ===\n");

    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let backend = match config.db_path() {
        Some(path) => NativeDbStore::open(path)?,
        None => NativeDbStore::in_memory()?,
    };

    let start = NaiveDate::from_ymd_opt(2024, 9, 2).ok_or("invalid start date")?;
    let clock = Arc::new(FixedClock::new(start));
    let mut store = ProgressionStore::with_clock(backend, config, clock.clone());
    store.load_data().await;
    store.set_child_name(Some("Mina".to_string()));

    let piano = store.add_custom_mission(MissionDraft::new(
        "Practice piano",
        MissionCategory::Study,
        4,
    ));
    if let Err(reason) = &piano {
        println!("Could not add custom mission: {}", reason);
    }
    store.reload_all_missions();

    println!("Missions:");
    let groups = registry::group_missions_by_category(store.all_missions());
    for (category, missions) in &groups {
        if missions.is_empty() {
            continue;
        }
        println!("  {}", category.label());
        for mission in missions {
            println!("    {} {} (+{})", mission.icon, mission.name, mission.star_reward);
        }
    }
    println!();

    // Three days of routines
    let routine: Vec<_> = store
        .active_missions()
        .into_iter()
        .filter(|m| m.category != MissionCategory::Evening)
        .map(|m| (m.id.clone(), m.star_reward))
        .collect();

    for _ in 0..3 {
        for (mission, reward) in &routine {
            let result = store.complete_mission(mission.clone(), *reward);
            if let Some(evolution) = result.evolution {
                let stage = pet::get_stage_config(evolution.character, evolution.to_stage)?;
                println!(
                    "  {} evolved into {}!",
                    pet::get_config(evolution.character).display_name,
                    stage.display_name
                );
            }
        }
        println!(
            "{}: {} missions done, +{} stars, streak {} days",
            store.today(),
            store.get_today_completed().len(),
            store.today_earned_stars(),
            store.get_streak_days()
        );
        clock.advance_days(1);
    }

    // A repeat on the same day pays nothing
    if let Some((mission, reward)) = routine.first() {
        store.complete_mission(mission.clone(), *reward);
        let repeat = store.complete_mission(mission.clone(), *reward);
        if let Some(reason) = repeat.outcome.rejection() {
            println!("\nSecond try: {}", reason);
        }
    }

    println!("\nStars: {}", store.total_stars());
    let outcome = store.purchase_catalog_item("crown");
    match outcome.rejection() {
        Some(reason) => println!("Crown not bought: {}", reason),
        None => {
            store.toggle_equip_item("crown", ItemSlot::Hat);
            println!("Bought and equipped the crown");
        }
    }
    println!("Stars left: {}", store.total_stars());

    let current = store.pet();
    let stage = current.stage_config()?;
    println!(
        "\n{} the {} ({}% to next stage)",
        stage.display_name,
        pet::get_config(current.character).display_name,
        (current.progress() * 100.0).round()
    );
    println!(
        "  \"{}\"",
        pet::get_random_dialogue(current.character, current.stage)?
    );

    store.flush().await?;
    info!(
        applied = store.writes_applied(),
        failed = store.writes_failed(),
        "writes settled"
    );

    println!("\n=== Demo Complete ===");
    Ok(())
}
