use super::*;

#[test]
fn missing_input_means_no_recommendation() {
    assert_eq!(recommend_size(None, None), None);
    assert_eq!(recommend_size(Some(180.0), None), None);
    assert_eq!(recommend_size(None, Some(75.0)), None);
}

#[test]
fn non_positive_or_non_finite_input_is_rejected() {
    assert_eq!(recommend_size(Some(0.0), Some(75.0)), None);
    assert_eq!(recommend_size(Some(-180.0), Some(75.0)), None);
    assert_eq!(recommend_size(Some(180.0), Some(f64::NAN)), None);
    assert_eq!(recommend_size(Some(f64::INFINITY), Some(75.0)), None);
}

#[test]
fn drop_bands_follow_bmi_boundaries() {
    // Height 200 cm makes BMI exactly weight / 4.
    let drop = |weight: f64| recommend_size(Some(200.0), Some(weight)).unwrap().drop;
    assert_eq!(drop(79.0), FitDrop::Slim);
    assert_eq!(drop(80.0), FitDrop::Regular, "BMI 20 is regular");
    assert_eq!(drop(104.0), FitDrop::Regular, "BMI 26 is regular");
    assert_eq!(drop(105.0), FitDrop::Comfort);
}

#[test]
fn size_is_even_and_tracks_height() {
    let rec = recommend_size(Some(180.0), Some(75.0)).unwrap();
    assert_eq!(rec.size, 48);
    assert_eq!(rec.drop, FitDrop::Regular);
    assert!((rec.bmi - 23.148).abs() < 0.01);

    let taller = recommend_size(Some(192.0), Some(85.0)).unwrap();
    assert!(taller.size >= rec.size);
    assert_eq!(taller.size % 2, 0);
}

#[test]
fn size_clamps_to_catalog_range() {
    let tiny = recommend_size(Some(140.0), Some(40.0)).unwrap();
    assert_eq!(tiny.size, 40);

    let huge = recommend_size(Some(210.0), Some(250.0)).unwrap();
    assert_eq!(huge.size, 70);
}
