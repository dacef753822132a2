use itertools::Itertools;

#[derive(Debug, Copy, Clone, Default, serde::Serialize)]
pub struct Statistics {
    count: usize,
    mean: f64,
    median: f64,
    std_dev: f64,
    min: f64,
    max: f64
}

impl<T: Iterator<Item=f64>> From<T> for Statistics {
    fn from(values: T) -> Self {
        let values = values.collect::<Vec<_>>();
        Self::from_vec(values)
    }
}

impl Statistics {
    fn from_vec(values: Vec<f64>) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let ordered = values.iter()
            .copied()
            .sorted_by(ord_float)
            .collect::<Vec<_>>();
        let median = if ordered.len() % 2 == 0 {
            (ordered[ordered.len() / 2 - 1] + ordered[ordered.len() / 2]) / 2.0
        } else {
            ordered[ordered.len() / 2]
        };
        let summed = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>();
        let variance = summed / values.len() as f64;
        let std_dev = variance.sqrt();
        Self {
            count: values.len(),
            mean,
            median,
            std_dev,
            min: ordered[0],
            max: ordered[ordered.len() - 1]
        }
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }
}

fn ord_float(a: &f64, b: &f64) -> std::cmp::Ordering {
    a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal)
}
