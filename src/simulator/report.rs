//! Simulation report generation.

use std::collections::BTreeMap;

use serde::Serialize;

use super::loot_sim::LootStats;
use super::runner::RunStats;
use crate::items::types::Rarity;

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub target_level: u32,
    pub runs_reached_target: u32,

    // Aggregated stats
    pub win_rate: f64,
    pub avg_final_level: f64,
    pub avg_encounters: f64,
    pub avg_defeats: f64,
    pub avg_rounds_per_encounter: f64,
    pub avg_experience_per_victory: f64,

    // Distribution data
    pub level_distribution: BTreeMap<u32, u32>,

    // Loot analysis
    pub loot: LootStats,

    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>, target_level: u32) -> Self {
        let num_runs = runs.len() as u32;
        let runs_reached_target = runs.iter().filter(|r| r.reached_target).count() as u32;
        let n = f64::from(num_runs);

        let encounters: u64 = runs.iter().map(|r| u64::from(r.encounters)).sum();
        let victories: u64 = runs.iter().map(|r| u64::from(r.victories)).sum();
        let defeats: u64 = runs.iter().map(|r| u64::from(r.defeats)).sum();
        let rounds: u64 = runs.iter().map(|r| r.total_rounds).sum();
        let experience: u64 = runs.iter().map(|r| r.experience_earned).sum();

        let mut level_distribution = BTreeMap::new();
        let mut loot = LootStats::default();
        for run in &runs {
            *level_distribution.entry(run.final_level).or_insert(0) += 1;
            loot.merge(&run.loot);
        }

        Self {
            num_runs,
            target_level,
            runs_reached_target,
            win_rate: ratio(victories as f64, encounters as f64),
            avg_final_level: ratio(runs.iter().map(|r| f64::from(r.final_level)).sum(), n),
            avg_encounters: ratio(encounters as f64, n),
            avg_defeats: ratio(defeats as f64, n),
            avg_rounds_per_encounter: ratio(rounds as f64, encounters as f64),
            avg_experience_per_victory: ratio(experience as f64, victories as f64),
            level_distribution,
            loot,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} reached level {}\n\n",
            self.num_runs, self.runs_reached_target, self.target_level
        ));

        report.push_str("── COMBAT ───────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Win Rate:            {:.1}%\n", self.win_rate * 100.0));
        report.push_str(&format!("  Avg Encounters:      {:.1}\n", self.avg_encounters));
        report.push_str(&format!("  Avg Defeats:         {:.2}\n", self.avg_defeats));
        report.push_str(&format!(
            "  Avg Rounds/Fight:    {:.2}\n\n",
            self.avg_rounds_per_encounter
        ));

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Final Level:     {:.1}\n", self.avg_final_level));
        report.push_str(&format!(
            "  Avg XP/Victory:      {:.1}\n",
            self.avg_experience_per_victory
        ));
        for (level, count) in &self.level_distribution {
            let pct = ratio(f64::from(*count), f64::from(self.num_runs)) * 100.0;
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  Level {:3}: {:>5.1}% {}\n", level, pct, bar));
        }
        report.push('\n');

        report.push_str("── LOOT ─────────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Total Drops:         {}\n", self.loot.total_drops));
        report.push_str(&format!("  Upgrades Equipped:   {}\n", self.loot.upgrades_equipped));
        report.push_str(&format!("  Gold Value:          {}\n", self.loot.gold_value));
        for rarity in Rarity::all() {
            let count = self.loot.count(rarity);
            let pct = ratio(f64::from(count), f64::from(self.loot.total_drops)) * 100.0;
            report.push_str(&format!("  {:<10} {:>7} ({:>5.1}%)\n", rarity.name(), count, pct));
        }

        report.push_str("\n── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let rating = if self.win_rate > 0.95 {
            "TOO EASY - Fights are rarely lost"
        } else if self.win_rate > 0.75 {
            "GOOD - Challenging but fair"
        } else if self.win_rate > 0.5 {
            "HARD - Many fights lost"
        } else {
            "TOO HARD - Most fights lost"
        };
        report.push_str(&format!("  Rating: {}\n", rating));
        if self.runs_reached_target < self.num_runs {
            report.push_str(&format!(
                "  ⚠️  {} runs stalled before level {}\n",
                self.num_runs - self.runs_reached_target,
                self.target_level
            ));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
