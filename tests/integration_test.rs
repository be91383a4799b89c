use ndarray::{Array1, Array3, Axis};
use parstats::{
    data_source::{read_samples, read_samples_from_path, SampleSource},
    parallel_sort,
    statistics::{partition_for, reduce_chunks, Merge, Moments},
    ParallelConfig, SortedSample, StatOperation, StatisticalReduction, StatsError,
};
use std::io::Write;
use tempfile::tempdir;

/// Deterministic values in `[0, 1000)`
fn generate(len: usize, seed: u64) -> Vec<f64> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            (state >> 11) as f64 / (1_u64 << 53) as f64 * 1000.0
        })
        .collect()
}

fn configs() -> Vec<ParallelConfig> {
    let mut configs = vec![ParallelConfig::single_threaded()];
    for threads in [2, 3, 7, 16, 64] {
        let config = ParallelConfig::new(threads).expect("non-zero thread cap");
        configs.push(config);
        configs.push(config.with_min_chunk_len(1).expect("non-zero chunk length"));
    }
    configs
}

fn assert_relative(actual: f64, expected: f64) {
    let scale = expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() / scale < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_thread_cap_does_not_change_results() {
    let data = generate(250_003, 7);

    let n = data.len() as f64;
    let naive_mean = data.iter().sum::<f64>() / n;
    let naive_variance =
        data.iter().map(|x| (x - naive_mean).powi(2)).sum::<f64>() / (n - 1.0);

    for config in configs() {
        assert_relative(parstats::sum_with(&data, &config), naive_mean * n);
        assert_relative(parstats::mean_with(&data, &config).unwrap(), naive_mean);
        assert_relative(parstats::variance_with(&data, &config).unwrap(), naive_variance);
        assert_relative(
            parstats::stdev_with(&data, &config).unwrap(),
            naive_variance.sqrt(),
        );
    }
}

#[test]
fn test_min_max_are_exact_for_every_chunking() {
    let mut data = generate(100_000, 11);
    data[73_421] = -5.0;
    data[12] = 2_000.0;

    for config in configs() {
        assert_eq!(parstats::min_with(&data, &config), Some(-5.0));
        assert_eq!(parstats::max_with(&data, &config), Some(2_000.0));
        assert_eq!(parstats::minmax_with(&data, &config), Some((-5.0, 2_000.0)));
    }
}

#[test]
fn test_chunk_plan_covers_input() {
    for config in configs() {
        for len in [1, 999, 1_000, 4_001, 250_003] {
            let chunks = partition_for(len, &config);
            assert!(!chunks.is_empty());
            assert!(chunks.len() <= config.max_threads());
            assert_eq!(chunks[0].start, 0);
            assert_eq!(chunks.last().map(|c| c.end), Some(len));
            for pair in chunks.windows(2) {
                assert_eq!(pair[0].end, pair[1].start);
                assert!(pair[0].len() <= pair[1].len());
            }
        }
    }
}

#[test]
fn test_merged_moments_match_single_pass() {
    let data = generate(40_000, 3);
    let config = ParallelConfig::new(6)
        .and_then(|c| c.with_min_chunk_len(100))
        .expect("valid config");

    let merged = reduce_chunks(data.len(), &config, |chunk| {
        Moments::from_slice(&data[chunk.range()])
    })
    .expect("non-empty input");
    let single = Moments::from_slice(&data);

    assert_eq!(merged.count(), single.count());
    assert_relative(merged.mean().unwrap(), single.mean().unwrap());
    assert_relative(merged.variance().unwrap(), single.variance().unwrap());

    // Merging with an empty state is the identity
    let with_empty = merged.merge(Moments::new());
    assert_eq!(with_empty, merged);
}

#[test]
fn test_integer_sum_is_exact() {
    let data: Vec<u64> = (1..=1_000_000).collect();
    for config in configs() {
        assert_eq!(parstats::sum_with(&data, &config), 500_000_500_000.0);
        assert_eq!(parstats::mean_with(&data, &config), Some(500_000.5));
    }
}

#[test]
fn test_repeated_calls_are_identical() {
    let data = generate(123_457, 5);
    let config = ParallelConfig::new(8).expect("non-zero thread cap");

    let first = (
        parstats::mean_with(&data, &config),
        parstats::variance_with(&data, &config),
        parstats::median_with(&data, &config).unwrap(),
        parstats::percentile_with(&data, 37.5, &config).unwrap(),
    );
    for _ in 0..5 {
        let again = (
            parstats::mean_with(&data, &config),
            parstats::variance_with(&data, &config),
            parstats::median_with(&data, &config).unwrap(),
            parstats::percentile_with(&data, 37.5, &config).unwrap(),
        );
        assert_eq!(again, first);
    }
}

#[test]
fn test_sort_statistics_leave_input_untouched() -> parstats::Result<()> {
    let data = generate(50_001, 9);
    let snapshot = data.clone();
    let config = ParallelConfig::new(4)?.with_sort_grain(64)?;

    let median = parstats::median_with(&data, &config)?;
    let p90 = parstats::percentile_with(&data, 90.0, &config)?;
    assert_eq!(data, snapshot);

    let mut sorted = snapshot;
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("no NaN"));
    assert_eq!(median, Some(sorted[25_000]));
    assert!(p90 > median);
    Ok(())
}

#[test]
fn test_parallel_sort_matches_std_sort() -> parstats::Result<()> {
    let mut data = generate(77_777, 13);
    let mut expected = data.clone();
    expected.sort_by(|a, b| a.partial_cmp(b).expect("no NaN"));

    parallel_sort(&mut data, &ParallelConfig::new(8)?.with_sort_grain(16)?)?;
    assert_eq!(data, expected);

    let mut integers: Vec<i64> = (0..10_000).map(|i| (i * 7_919) % 10_007 - 5_000).collect();
    let mut expected = integers.clone();
    expected.sort_unstable();
    parallel_sort(&mut integers, &ParallelConfig::new(3)?)?;
    assert_eq!(integers, expected);
    Ok(())
}

#[test]
fn test_sorted_sample_serves_many_percentiles() -> parstats::Result<()> {
    let data = generate(10_000, 21);
    let config = ParallelConfig::new(4)?;
    let sorted = SortedSample::new(&data, &config)?;

    assert_eq!(sorted.len(), data.len());
    assert_eq!(sorted.median(), parstats::median_with(&data, &config)?);

    let mut previous = f64::NEG_INFINITY;
    for p in [0.0, 1.0, 10.0, 25.0, 50.0, 75.0, 99.0, 100.0] {
        let value = sorted.percentile(p)?.expect("non-empty sample");
        assert!(value >= previous);
        assert_eq!(Some(value), parstats::percentile_with(&data, p, &config)?);
        previous = value;
    }
    assert_eq!(sorted.percentile(0.0)?, parstats::min(&data));
    assert_eq!(sorted.percentile(100.0)?, parstats::max(&data));
    Ok(())
}

#[test]
fn test_nan_is_rejected_in_large_input() {
    let mut data = generate(20_000, 17);
    data[15_321] = f64::NAN;
    let config = ParallelConfig::new(4).expect("non-zero thread cap");

    assert!(matches!(
        parstats::median_with(&data, &config),
        Err(StatsError::UnorderedValue { index: 15_321 })
    ));
}

#[test]
fn test_weighted_mean_large_input() -> parstats::Result<()> {
    let values = generate(60_000, 23);
    let weights = generate(60_000, 29);

    let total: f64 = weights.iter().sum();
    let expected = values
        .iter()
        .zip(&weights)
        .map(|(v, w)| v * w)
        .sum::<f64>()
        / total;

    for config in configs() {
        let actual = parstats::weighted_mean_with(&values, &weights, &config)?;
        assert_relative(actual.expect("positive weights"), expected);
    }
    Ok(())
}

#[test]
fn test_reduce_ndarray_volume() -> parstats::Result<()> {
    // Create test data - a 3D array (20x30x40)
    let values = generate(24_000, 31);
    let volume = Array3::from_shape_vec((20, 30, 40), values.clone())
        .map_err(|e| StatsError::Generic(e.to_string()))?;
    let config = ParallelConfig::new(4)?.with_min_chunk_len(500)?;

    for op in StatOperation::ALL {
        assert_eq!(
            volume.reduce_stat_with(op, &config)?,
            values.as_slice().reduce_stat_with(op, &config)?,
            "{op} differs between ndarray and slice input"
        );
    }

    // Fixing the last index leaves a plane with stride 40
    let lane = volume.index_axis(Axis(2), 3);
    assert!(lane.as_slice_memory_order().is_none());
    let copied: Vec<f64> = lane.iter().copied().collect();
    assert_eq!(
        lane.reduce_stat_with(StatOperation::Mean, &config)?,
        parstats::mean_with(&copied, &config)
    );
    assert_eq!(
        lane.percentile_stat_with(90.0, &config)?,
        parstats::percentile_with(&copied, 90.0, &config)?
    );

    let empty: Array1<f32> = Array1::zeros(0);
    assert_eq!(empty.reduce_stat(StatOperation::Variance)?, None);
    Ok(())
}

#[test]
fn test_read_samples_from_file() -> parstats::Result<()> {
    // Create a temporary input file for testing
    let temp_dir = tempdir()?;
    let file_path = temp_dir.path().join("samples.txt");
    {
        let mut file = std::fs::File::create(&file_path)?;
        writeln!(file, "# station readings")?;
        writeln!(file, "1.5, 2.5;3")?;
        writeln!(file)?;
        writeln!(file, "  -4e2\t5   # trailing comment")?;
    }

    let samples = read_samples_from_path(&file_path)?;
    assert_eq!(samples, vec![1.5, 2.5, 3.0, -400.0, 5.0]);

    let source = SampleSource::from_arg(Some(file_path.clone()));
    assert_eq!(source, SampleSource::Path(file_path));
    assert_eq!(source.read()?, samples);
    assert_eq!(
        SampleSource::from_arg(Some("-".into())),
        SampleSource::Stdin
    );
    assert_eq!(SampleSource::from_arg(None), SampleSource::Stdin);
    Ok(())
}

#[test]
fn test_read_samples_reports_bad_token() {
    let input = "1 2 3\n4 five 6\n";
    match read_samples(input.as_bytes()) {
        Err(StatsError::ParseError { line, token }) => {
            assert_eq!(line, 2);
            assert_eq!(token, "five");
        }
        other => panic!("expected a parse error, got {other:?}"),
    }

    let missing = tempdir().expect("Failed to create temp dir").path().join("absent.txt");
    assert!(matches!(
        read_samples_from_path(missing),
        Err(StatsError::IoError(_))
    ));
}
