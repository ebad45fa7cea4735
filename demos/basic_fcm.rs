//! Basic fuzzy c-means example
//!
//! Standardizes a small indicator table, clusters it for several cluster
//! counts and compares the quality scores of each run.

use fuzzy_regions::{evaluate, project2d, standardize, FuzzyCMeans, HardLabels};
use ndarray::Array2;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Five regions, three indicators (rice, fisheries, cocoa)
    let keys: Vec<String> = ["A", "B", "C", "D", "E"].iter().map(|s| s.to_string()).collect();
    let data = Array2::from_shape_vec(
        (5, 3),
        vec![
            10.0, 2.0, 1.0,
            11.0, 2.0, 1.0,
            1.0, 9.0, 8.0,
            1.0, 10.0, 9.0,
            5.0, 5.0, 5.0,
        ],
    )?;

    let z = standardize(data.view())?;
    println!("Standardized data:\n{:.3}", z);
    println!();

    println!("=== Two clusters ===");
    let result = FuzzyCMeans::new(2).random_state(42).fit(z.view())?;
    println!("Converged: {} after {} iterations", result.converged, result.n_iter);
    println!("Objective: {:.4}", result.objective());
    println!("Partition coefficient: {:.4}", result.partition_coefficient);

    let labels = HardLabels::new(keys.clone(), result.membership.view())?;
    for ((key, label), column) in labels.iter().zip(result.membership.columns()) {
        println!("  {} -> cluster {} (memberships {:.3})", key, label, column);
    }

    let report = evaluate(z.view(), &labels)?;
    println!("Silhouette: {:.4}", report.cohesion_separation);
    println!("Davies-Bouldin: {:.4}", report.distance_spread_ratio);
    println!("Calinski-Harabasz: {:.4}", report.variance_ratio);
    println!();

    println!("=== Comparing cluster counts ===");
    for k in 2..=4 {
        let result = FuzzyCMeans::new(k).random_state(42).fit(z.view())?;
        let labels = HardLabels::new(keys.clone(), result.membership.view())?;
        match evaluate(z.view(), &labels) {
            Ok(report) => println!(
                "k={}: silhouette={:.3}, davies-bouldin={:.3}, calinski-harabasz={:.3}",
                k, report.cohesion_separation, report.distance_spread_ratio, report.variance_ratio
            ),
            Err(e) => println!("k={}: {}", k, e),
        }
    }
    println!();

    println!("=== 2-D projection ===");
    let projection = project2d(z.view())?;
    for (key, (x, y)) in keys.iter().zip(projection.pairs()) {
        println!("  {}: ({:7.3}, {:7.3})", key, x, y);
    }

    Ok(())
}
