pub fn mean(data: &[f64]) -> Option<f64> {
    (!data.is_empty()).then(|| data.iter().sum::<f64>() / data.len() as f64)
}

pub fn std_dev(data: &[f64]) -> Option<f64> {
    let mid = mean(data)?;
    let variance = data.iter().map(|v| (v - mid) * (v - mid)).sum::<f64>() / data.len() as f64;

    Some(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[0.25, 0.5, 0.75, 1.0, 0.5]), Some(0.6));
        assert_eq!(mean(&[1.5, 0.75, 5.5, 1.25, 0.5]), Some(1.9));
    }

    #[test]
    fn test_mean_single_value() {
        assert_eq!(mean(&[0.42]), Some(0.42));
    }

    #[test]
    fn test_mean_empty_slice() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_std_dev() {
        // mean 1.0, variance (0.0625 + 0.0625) / 4
        assert_eq!(std_dev(&[0.75, 1.25, 1.0, 1.0]), Some(0.03125f64.sqrt()));
    }

    #[test]
    fn test_std_dev_single_value() {
        assert_eq!(std_dev(&[0.42]), Some(0.0));
    }

    #[test]
    fn test_std_dev_empty_slice() {
        assert_eq!(std_dev(&[]), None);
    }

    #[test]
    fn test_std_dev_identical_values() {
        assert_eq!(std_dev(&[0.5, 0.5, 0.5, 0.5]), Some(0.0));
    }
}
