//! Full request for one sector sheet: cluster, join to map polygons and
//! print the narrative and policy text for every region.

use fuzzy_regions::geo::cluster_color;
use fuzzy_regions::sector::recommendation_for;
use fuzzy_regions::{join_labels, ClusteringPipeline, IndicatorTable, MissingValuePolicy, Sector};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let sheet = "perikanan";
    let table = IndicatorTable::from_rows(
        vec!["budidaya_laut".into(), "tambak".into(), "tangkap".into()],
        vec![
            ("Kota Kendari", vec![Some(1200.0), Some(300.0), Some(15000.0)]),
            ("Kota Baubau", vec![Some(900.0), Some(150.0), Some(12000.0)]),
            ("Konawe", vec![Some(4000.0), Some(9000.0), Some(3000.0)]),
            ("Kolaka", vec![Some(3800.0), Some(8500.0), None]),
            ("Muna", vec![Some(20000.0), Some(1200.0), Some(4000.0)]),
            ("Buton", vec![Some(18000.0), Some(900.0), Some(5000.0)]),
            ("Wakatobi", vec![Some(22000.0), Some(100.0), Some(6000.0)]),
            ("Bombana", vec![Some(5000.0), Some(10000.0), Some(2500.0)]),
        ],
        MissingValuePolicy::Zero,
    )?;

    let run = ClusteringPipeline::new(3).random_state(42).run(&table)?;
    println!("Cluster sizes: {:?}", run.cluster_sizes());
    match &run.evaluation {
        Ok(report) => println!(
            "Silhouette {:.3}, Davies-Bouldin {:.3}, Calinski-Harabasz {:.3}",
            report.cohesion_separation, report.distance_spread_ratio, report.variance_ratio
        ),
        Err(err) => println!("No quality scores: {}", err),
    }
    println!();

    // Polygon names as they come out of the shapefile
    let polygons = ["KOTA KENDARI", "Kota Baubau", "konawe", "Kolaka", "Muna", "Buton", "Wakatobi", "Bombana", "Konawe Kepulauan"];
    let join = join_labels(&polygons, &run.labels);
    for ((key, cluster), color) in join.assignments.iter().zip(join.colors()) {
        println!("  {:<18} cluster {:?} colour {}", key, cluster, color);
    }
    if !join.missing.is_empty() {
        println!("Not in clustering result: {:?}", join.missing);
    }
    println!();

    if let Some(sector) = Sector::from_dataset_name(sheet) {
        println!("=== {} ===", sector.title());
        for cluster in 0..run.fcm.n_clusters() {
            println!(
                "Cluster {} ({}): {}",
                cluster,
                cluster_color(cluster),
                sector.interpretation(cluster).unwrap_or("-")
            );
        }
    }
    println!();

    for (key, cluster) in run.labels.iter() {
        println!("{} (cluster {}): {}", key, cluster, recommendation_for(sheet, cluster));
    }

    Ok(())
}
