use crate::models::Insights;

/// Correlations weaker than this are noise for display purposes.
pub const STRONG_CORRELATION_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationPair {
    pub left: String,
    pub right: String,
    pub value: f64,
}

/// Scans the correlation matrix for column pairs whose absolute
/// correlation exceeds `threshold`, excluding self-pairs. Order follows
/// the matrix iteration order.
pub fn strong_correlations(insights: &Insights, threshold: f64) -> Vec<CorrelationPair> {
    let Some(correlations) = insights.correlations.as_ref() else {
        return Vec::new();
    };

    let mut pairs = Vec::new();
    for (left, row) in correlations {
        for (right, value) in row {
            if left == right {
                continue;
            }
            if value.abs() > threshold {
                pairs.push(CorrelationPair {
                    left: left.clone(),
                    right: right.clone(),
                    value: *value,
                });
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn insights_with(matrix: Vec<(&str, Vec<(&str, f64)>)>) -> Insights {
        let correlations = matrix
            .into_iter()
            .map(|(col, row)| {
                (
                    col.to_string(),
                    row.into_iter()
                        .map(|(c, v)| (c.to_string(), v))
                        .collect::<BTreeMap<_, _>>(),
                )
            })
            .collect();
        Insights {
            correlations: Some(correlations),
            ..Default::default()
        }
    }

    #[test]
    fn excludes_self_pairs_and_weak_values() {
        let insights = insights_with(vec![
            ("cost", vec![("cost", 1.0), ("revenue", -0.8), ("units", 0.2)]),
            ("revenue", vec![("cost", -0.8), ("revenue", 1.0), ("units", 0.6)]),
        ]);

        let pairs = strong_correlations(&insights, STRONG_CORRELATION_THRESHOLD);
        assert_eq!(pairs.len(), 3);
        assert!(pairs.iter().all(|p| p.left != p.right));
        assert!(pairs.iter().all(|p| p.value.abs() > 0.5));
    }

    #[test]
    fn negative_correlations_count_by_magnitude() {
        let insights = insights_with(vec![("a", vec![("b", -0.9)])]);
        let pairs = strong_correlations(&insights, 0.5);
        assert_eq!(pairs.len(), 1);
        assert!((pairs[0].value + 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_matrix_yields_nothing() {
        assert!(strong_correlations(&Insights::default(), 0.5).is_empty());
    }
}
