//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `sprout_core` linkage.
//! - Print the bundled journey seed so content edits can be eyeballed.

use sprout_core::{domain_progress, JourneyTree};

fn main() {
    println!("sprout_core ping={}", sprout_core::ping());
    println!("sprout_core version={}", sprout_core::core_version());

    let tree = match JourneyTree::seed() {
        Ok(tree) => tree,
        Err(err) => {
            eprintln!("seed error: {err}");
            std::process::exit(1);
        }
    };
    for phase in tree.phases() {
        println!("phase {} ({})", phase.id, phase.name);
        for domain in &phase.domains {
            println!(
                "  {:<10} milestones={} progress={}%",
                domain.id,
                domain.milestones.len(),
                domain_progress(domain)
            );
        }
    }
}
