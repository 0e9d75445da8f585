//! Loading movie data and configuration from disk

use movie_charts::charts::{ChartData, ChartKind};
use movie_charts::config::{AnalysisConfig, ChartSize, OutputFormat};
use movie_charts::movies::{load_movies, AnalysisError, DataSummary};
use movie_charts::pipeline::prepare_charts;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const MOVIES_CSV: &str = "\
Rank,Title,Genre,Description,Director,Actors,Year,Runtime (Minutes),Rating,Votes,Revenue (Millions),Metascore
1,Guardians of the Galaxy,\"Action,Adventure,Sci-Fi\",A group of intergalactic criminals.,James Gunn,Chris Pratt,2014,121,8.1,757074,333.13,76
2,Prometheus,\"Adventure,Mystery,Sci-Fi\",Following clues to the origin of mankind.,Ridley Scott,Noomi Rapace,2012,124,7.0,485820,126.46,65
3,Split,\"Horror,Thriller\",Three girls are kidnapped.,M. Night Shyamalan,James McAvoy,2016,117,7.3,157606,138.12,62
4,Sing,\"Animation,Comedy,Family\",A koala tries to save his theater.,Christophe Lourdelet,Matthew McConaughey,2016,108,7.2,60545,270.32,59
5,Suicide Squad,\"Action,Adventure,Fantasy\",A secret government agency recruits villains.,David Ayer,Will Smith,2016,123,6.2,393727,325.02,40
6,The Great Wall,\"Action,Adventure,Fantasy\",European mercenaries in ancient China.,Yimou Zhang,Matt Damon,2016,103,6.1,56036,45.13,42
7,La La Land,\"Comedy,Drama,Music\",A jazz pianist falls for an aspiring actress.,Damien Chazelle,Ryan Gosling,2016,128,8.3,258682,151.06,93
8,Mindhorn,Comedy,A has-been actor reprises his role.,Sean Foley,Essie Davis,2016,89,6.4,2490,,71
9,The Lost City of Z,\"Action,Adventure,Biography\",A true-life drama.,James Gray,Charlie Hunnam,2016,141,7.1,7188,8.01,78
10,Passengers,\"Adventure,Drama,Romance\",A spacecraft traveling to a distant colony.,Morten Tyldum,Jennifer Lawrence,2016,116,7.0,192177,100.01,41
";

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn loads_dataset_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "movies.csv", MOVIES_CSV);

    let movies = load_movies(&path).unwrap();
    assert_eq!(movies.height(), 10);

    let summary = DataSummary::from_frame(&movies).unwrap();
    assert_eq!(summary.missing_revenue, 1);
    assert_eq!(summary.year_range, Some((2012, 2016)));
    assert_eq!(summary.rating_range, Some((6.1, 8.3)));
}

#[test]
fn missing_input_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let result = load_movies(&dir.path().join("nope.csv"));
    assert!(matches!(result, Err(AnalysisError::Io(_))));
}

#[test]
fn missing_column_is_reported_by_name() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "movies.csv",
        "Title,Genre,Year,Runtime (Minutes),Revenue (Millions)\nA,Drama,2010,100,1.0\n",
    );
    match load_movies(&path) {
        Err(AnalysisError::MissingColumn(name)) => assert_eq!(name, "Rating"),
        other => panic!("expected MissingColumn, got {:?}", other),
    }
}

#[test]
fn config_file_drives_chart_preparation() {
    let dir = TempDir::new().unwrap();
    let csv = write(dir.path(), "movies.csv", MOVIES_CSV);
    let config_json = format!(
        r#"{{
            "input": {input:?},
            "output_format": "svg",
            "top_n": 3,
            "histogram_bins": 5,
            "kde": false,
            "sizes": {{ "revenue": {{ "width": 900, "height": 500 }} }}
        }}"#,
        input = csv.display().to_string()
    );
    let config_path = write(dir.path(), "movie_charts.json", &config_json);

    let config = AnalysisConfig::load(Some(&config_path)).unwrap();
    config.validate().unwrap();
    assert_eq!(config.output_format, OutputFormat::Svg);
    assert_eq!(config.sizes.get(ChartKind::TopRevenue), ChartSize::new(900, 500));

    let movies = load_movies(&config.input).unwrap();
    let prepared = prepare_charts(&movies, &config).unwrap();
    assert_eq!(prepared.len(), 5);

    let (spec, data) = &prepared[1];
    assert_eq!(spec.file_name(config.output_format), "top_3_movies_by_revenue.svg");
    assert_eq!(spec.size, ChartSize::new(900, 500));
    match data {
        ChartData::HorizontalBars { bars, .. } => {
            let titles: Vec<&str> = bars.iter().map(|b| b.0.as_str()).collect();
            assert_eq!(titles, vec!["Guardians of the Galaxy", "Suicide Squad", "Sing"]);
        }
        other => panic!("expected bars, got {:?}", other),
    }

    match &prepared[0].1 {
        ChartData::Histogram { bins, density, .. } => {
            assert_eq!(bins.len(), 5);
            assert!(density.is_none());
        }
        other => panic!("expected histogram, got {:?}", other),
    }

    // Mindhorn has no revenue, so only nine points
    assert_eq!(prepared[2].1.len(), 9);
}

#[test]
fn explicit_config_path_must_exist() {
    let dir = TempDir::new().unwrap();
    let result = AnalysisConfig::load(Some(&dir.path().join("missing.json")));
    assert!(matches!(result, Err(AnalysisError::Io(_))));
}
