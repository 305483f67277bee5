//! Chart-ready series for personality records
//!
//! Nothing here draws; the structs serialize to JSON that a front end can feed
//! into any plotting library.

use serde::Serialize;

use crate::models::PersonalityRecord;
use crate::personality::align;
use crate::personality::Dimension;
use crate::personality::Scores;

/// Marker colors handed out to series in order
pub const PALETTE: [&str; 6] = [
    "#FF69B4", "#1E90FF", "#FFA500", "#32CD32", "#9370DB", "#FF6347",
];

/// Bilingual labels of one spectrum line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DimensionAxis {
    pub dimension: Dimension,
    pub label: &'static str,
    pub left: &'static str,
    pub right: &'static str,
    pub y: usize,
}

impl DimensionAxis {
    pub const fn for_dimension(dimension: Dimension) -> Self {
        let (label, left, right) = match dimension {
            Dimension::Energy => ("Energy (能量方向)", "I (內向)", "E (外向)"),
            Dimension::Information => ("Information (資訊)", "S (實感)", "N (直覺)"),
            Dimension::Decisions => ("Decisions (決策)", "T (思考)", "F (情感)"),
            Dimension::Lifestyle => ("Lifestyle (生活)", "J (判斷)", "P (感知)"),
        };
        Self {
            dimension,
            label,
            left,
            right,
            y: dimension.index(),
        }
    }
}

pub fn axes() -> Vec<DimensionAxis> {
    Dimension::ALL
        .into_iter()
        .map(DimensionAxis::for_dimension)
        .collect()
}

fn color(i: usize) -> &'static str {
    PALETTE[i % PALETTE.len()]
}

fn legend(record: &PersonalityRecord) -> String {
    format!("{} ({})", record.name, record.mbti)
}

/// Scores placed on the spectrum, aligned with the record's code
fn spectrum_points(record: &PersonalityRecord) -> Scores {
    let raw: Vec<f64> = record.scores.iter().map(|&s| f64::from(s)).collect();
    align(Some(record.mbti.as_string().as_str()), &raw).scores()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpectrumSeries {
    pub name: String,
    pub color: &'static str,
    /// x position per axis, indexed like [`Dimension::ALL`]
    pub points: Scores,
}

/// One horizontal 0..100 line per dimension with every person plotted on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BipolarChart {
    pub title: String,
    pub axes: Vec<DimensionAxis>,
    pub series: Vec<SpectrumSeries>,
    pub x_range: [i32; 2],
}

pub fn bipolar_chart(records: &[PersonalityRecord]) -> BipolarChart {
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    BipolarChart {
        title: format!("📊 {} 性格光譜對比", names.join(" vs ")),
        axes: axes(),
        series: records
            .iter()
            .enumerate()
            .map(|(i, record)| SpectrumSeries {
                name: legend(record),
                color: color(i),
                points: spectrum_points(record),
            })
            .collect(),
        x_range: [-20, 120],
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarSeries {
    pub name: String,
    pub color: &'static str,
    pub values: Scores,
}

/// Grouped bars: one group per dimension, one bar per person
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarChart {
    pub categories: Vec<&'static str>,
    pub series: Vec<BarSeries>,
}

pub fn group_bar_chart(records: &[PersonalityRecord]) -> BarChart {
    BarChart {
        categories: axes().iter().map(|a| a.label).collect(),
        series: records
            .iter()
            .enumerate()
            .map(|(i, record)| BarSeries {
                name: legend(record),
                color: color(i),
                values: record.scores,
            })
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RadarSeries {
    pub name: String,
    pub color: &'static str,
    /// Closed polygon: the first value is repeated at the end
    pub values: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RadarChart {
    /// Angular labels, closed like the values
    pub theta: Vec<&'static str>,
    pub series: Vec<RadarSeries>,
    pub radial_range: [i32; 2],
}

pub fn radar_chart(records: &[PersonalityRecord]) -> RadarChart {
    let mut theta: Vec<&'static str> = axes().iter().map(|a| a.right).collect();
    theta.push(theta[0]);

    RadarChart {
        theta,
        series: records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let mut values = record.scores.to_vec();
                values.push(record.scores[0]);
                RadarSeries {
                    name: legend(record),
                    color: color(i),
                    values,
                }
            })
            .collect(),
        radial_range: [0, 100],
    }
}

/// Every chart for an analysis result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartBundle {
    pub bipolar: BipolarChart,
    pub bar: BarChart,
    pub radar: RadarChart,
}

impl ChartBundle {
    pub fn from_records(records: &[PersonalityRecord]) -> Self {
        Self {
            bipolar: bipolar_chart(records),
            bar: group_bar_chart(records),
            radar: radar_chart(records),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, mbti: &str, scores: Scores) -> PersonalityRecord {
        PersonalityRecord {
            name: name.to_string(),
            mbti: mbti.parse().unwrap(),
            scores,
        }
    }

    #[test]
    fn test_axes_are_bilingual_and_ordered() {
        let axes = axes();
        assert_eq!(axes.len(), 4);
        assert_eq!(axes[0].left, "I (內向)");
        assert_eq!(axes[3].right, "P (感知)");
        assert!(axes.iter().enumerate().all(|(i, a)| a.y == i));
    }

    #[test]
    fn test_bipolar_realigns_points() {
        let records = [
            record("Amy", "INTJ", [90, 90, 90, 90]),
            record("Ben", "ESFP", [10, 10, 10, 10]),
        ];
        let chart = bipolar_chart(&records);

        assert_eq!(chart.title, "📊 Amy vs Ben 性格光譜對比");
        assert_eq!(chart.series[0].name, "Amy (INTJ)");
        assert_eq!(chart.series[0].points, [45, 90, 45, 45]);
        assert_eq!(chart.series[1].points, [55, 10, 55, 55]);
        assert_eq!(chart.series[1].color, "#1E90FF");
    }

    #[test]
    fn test_bar_and_radar_shapes() {
        let records = [record("Amy", "ENFP", [70, 80, 60, 90])];

        let bar = group_bar_chart(&records);
        assert_eq!(bar.categories[1], "Information (資訊)");
        assert_eq!(bar.series[0].values, [70, 80, 60, 90]);

        let radar = radar_chart(&records);
        assert_eq!(radar.theta, ["E (外向)", "N (直覺)", "F (情感)", "P (感知)", "E (外向)"]);
        assert_eq!(radar.series[0].values, [70, 80, 60, 90, 70]);
    }

    #[test]
    fn test_bundle_serializes() {
        let bundle = ChartBundle::from_records(&[record("Amy", "ISTJ", [20, 30, 40, 10])]);
        let value = serde_json::to_value(&bundle).unwrap();
        assert_eq!(value["bipolar"]["axes"][0]["dimension"], "energy");
        assert_eq!(value["radar"]["radial_range"][1], 100);
    }
}
