use super::*;

#[test]
fn rand_follows_the_hash_seeded_generator() {
    let hash = FxHash::generate(7);
    let mut host = HeadlessHost::new(hash.clone());
    let mut reference = hash.rng();
    for _ in 0..16 {
        assert_eq!(host.rand().to_bits(), reference.next_f64().to_bits());
    }
    assert_eq!(host.hash(), &hash);
}

#[test]
fn records_reports_previews_and_messages() {
    let mut host = HeadlessHost::new(FxHash::generate(1));
    assert!(host.reported_features().is_none());
    assert_eq!(host.preview_count(), 0);

    let summary = FeatureSummary::default();
    host.report_features(&summary);
    host.preview();
    host.post_parent_message("forceDownloaded");

    assert_eq!(host.reported_features(), Some(&summary));
    assert_eq!(host.preview_count(), 1);
    assert_eq!(host.parent_messages(), ["forceDownloaded".to_string()]);
}
