use std::collections::BTreeSet;
use std::sync::Arc;

use proptest::prelude::*;
use skymap::api::{ObjectKind, OneOrMany};
use skymap::catalog::{hipparcos, StarCatalog};
use skymap::engine::{EphemerisProvider, PositionEngine, NAKED_EYE_MAGNITUDE_LIMIT};
use skymap::models::{
    CatalogPosition, CelestialBody, HipparcosId, ObservationTime, Observer, SkyPosition,
    StarCatalogEntry, Target,
};
use skymap::services::{
    locations, plot_radius, render_objects, star_marker_size, RenderStyle, SkyMapRequest,
};
use skymap::SkyMapResult;

mod support;

fn star_ids(response: &skymap::api::SkyMapResponse) -> BTreeSet<String> {
    response
        .objects
        .iter()
        .filter(|o| o.kind == ObjectKind::Star)
        .map(|o| o.label.clone())
        .collect()
}

fn angle_diff(a: f64, b: f64) -> f64 {
    ((a - b + 180.0).rem_euclid(360.0) - 180.0).abs()
}

/// Great-circle distance between two horizontal positions, in degrees.
fn separation(alt1: f64, az1: f64, alt2: f64, az2: f64) -> f64 {
    let (a1, a2) = (alt1.to_radians(), alt2.to_radians());
    let cos_d = a1.sin() * a2.sin() + a1.cos() * a2.cos() * (az1 - az2).to_radians().cos();
    cos_d.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Textbook reduction of J2000 coordinates with mean sidereal time only.
///
/// Ignores precession, nutation, aberration and proper motion, which together
/// move the bright stars by well under a degree between 1991 and 2024.
fn textbook_altaz(ra_deg: f64, dec_deg: f64, lat_deg: f64, lon_deg: f64, jd: f64) -> (f64, f64) {
    let gmst = 280.460_618_37 + 360.985_647_366_29 * (jd - 2_451_545.0);
    let hour_angle = (gmst + lon_deg - ra_deg).to_radians();
    let (dec, lat) = (dec_deg.to_radians(), lat_deg.to_radians());
    let alt = (lat.sin() * dec.sin() + lat.cos() * dec.cos() * hour_angle.cos()).asin();
    let az = (-dec.cos() * hour_angle.sin())
        .atan2(dec.sin() * lat.cos() - dec.cos() * lat.sin() * hour_angle.cos());
    (alt.to_degrees(), az.to_degrees().rem_euclid(360.0))
}

/// 2024-06-21 22:00 UTC.
const SOLSTICE_EVENING_JD: f64 = 2_460_483.416_666_7;

/// Every catalogue star is plotted exactly when the textbook reduction puts
/// it clearly above the horizon, and lands within a degree of it.
fn assert_stars_match_textbook(location: &str, response: &skymap::api::SkyMapResponse) {
    let site = locations::lookup(location).unwrap();
    let catalog = hipparcos::load(support::bright_stars_path()).unwrap();
    let plotted = star_ids(response);

    for star in catalog.entries() {
        let label = format!("HIP {}", star.id.value());
        let (alt, az) = textbook_altaz(
            star.position.ra.value(),
            star.position.dec.value(),
            site.latitude,
            site.longitude,
            SOLSTICE_EVENING_JD,
        );
        if alt < -1.0 {
            assert!(!plotted.contains(&label), "{label} plotted at textbook altitude {alt}");
            continue;
        }
        if alt < 1.0 {
            continue;
        }
        let obj = response
            .objects
            .iter()
            .find(|o| o.label == label)
            .unwrap_or_else(|| panic!("{label} missing at textbook altitude {alt}"));
        let (got_alt, got_az) = (obj.altitude.value(), obj.azimuth.value());
        assert!((got_alt - alt).abs() < 1.0, "{label}: {alt} vs {got_alt}");
        if alt < 70.0 {
            assert!(angle_diff(got_az, az) < 1.5, "{label}: {az} vs {got_az}");
        }
    }
}

#[test]
fn test_san_francisco_solstice_evening() {
    let service = support::default_service();
    let response = service
        .objects(&SkyMapRequest::new("San Francisco", "2024-06-21", 22))
        .unwrap();

    // Full Moon the next morning, so it is well below the horizon.
    let bodies: Vec<(&str, f64, f64)> = response
        .objects
        .iter()
        .filter(|o| o.kind == ObjectKind::Body)
        .map(|o| (o.label.as_str(), o.altitude.value(), o.azimuth.value()))
        .collect();
    let names: Vec<&str> = bodies.iter().map(|b| b.0).collect();
    assert_eq!(names, vec!["Mercury", "Venus", "Mars", "Sun"]);

    let (_, sun_alt, sun_az) = bodies[3];
    assert!((sun_alt - 62.796).abs() < 0.1, "Sun altitude {sun_alt}");
    assert!(angle_diff(sun_az, 245.973) < 0.1, "Sun azimuth {sun_az}");

    // Both inner planets are a few days past superior conjunction.
    for &(name, alt, az) in &bodies[..2] {
        assert!(separation(alt, az, sun_alt, sun_az) < 12.0, "{name} at {alt}/{az}");
    }
    let (_, mars_alt, mars_az) = bodies[2];
    assert!(mars_alt > 5.0 && mars_alt < 30.0, "Mars altitude {mars_alt}");
    assert!(angle_diff(mars_az, 270.0) < 20.0, "Mars azimuth {mars_az}");

    assert_stars_match_textbook("San Francisco", &response);
    for hip in [11767, 24608, 27989, 32349, 37279, 69673] {
        assert!(star_ids(&response).contains(&format!("HIP {}", hip)), "HIP {hip}");
    }
    assert!(!star_ids(&response).contains("HIP 91262"));
}

#[test]
fn test_london_solstice_evening() {
    let service = support::default_service();
    let response = service
        .objects(&SkyMapRequest::new("London", "2024-06-21", 22))
        .unwrap();

    // Sun, Mercury, Venus and Mars have set; the Moon is low in the south.
    let bodies: Vec<&str> = response
        .objects
        .iter()
        .filter(|o| o.kind == ObjectKind::Body)
        .map(|o| o.label.as_str())
        .collect();
    assert_eq!(bodies, vec!["Moon"]);
    let moon = &response.objects[0];
    assert!(moon.altitude.value() > 0.0 && moon.altitude.value() < 12.0);
    assert!(angle_diff(moon.azimuth.value(), 150.0) < 20.0);

    assert_stars_match_textbook("London", &response);
    let vega = response
        .objects
        .iter()
        .find(|o| o.label == "HIP 91262")
        .unwrap();
    assert!((vega.altitude.value() - 60.2).abs() < 0.5);
    assert!(angle_diff(vega.azimuth.value(), 99.9) < 0.5);
    assert!(!star_ids(&response).contains("HIP 32349"));
    assert_eq!(response.star_count, 12);
}

#[test]
fn test_changing_location_changes_every_position() {
    let service = support::default_service();
    let a = service
        .objects(&SkyMapRequest::new("San Francisco", "2024-06-21", 22))
        .unwrap();
    let b = service
        .objects(&SkyMapRequest::new("London", "2024-06-21", 22))
        .unwrap();
    for obj in &a.objects {
        if let Some(other) = b.objects.iter().find(|o| o.label == obj.label) {
            assert_ne!(obj.altitude, other.altitude, "{}", obj.label);
        }
    }
}

#[test]
fn test_chart_matches_objects() {
    let service = support::default_service();
    let request = SkyMapRequest::new("Sydney", "2024-06-21", 12);
    let chart = service.sky_map(&request).unwrap();
    let response = service.objects(&request).unwrap();

    let stars = &chart.data[0];
    assert_eq!(stars.name, "Stars");
    assert_eq!(stars.r.len(), response.star_count);
    assert_eq!(chart.data.len(), 1 + response.body_count);
    for r in stars.r.iter() {
        assert!((0.0..90.0).contains(r));
    }
}

#[test]
fn test_repeated_requests_are_identical() {
    let service = support::default_service();
    let request = SkyMapRequest::new("Cape Town", "2024-12-01", 19);
    assert_eq!(
        service.sky_map(&request).unwrap(),
        service.sky_map(&request).unwrap()
    );
}

/// Puts every body at the zenith.
struct ZenithSky;

impl EphemerisProvider for ZenithSky {
    fn altaz(
        &self,
        _target: Target<'_>,
        _observer: &Observer,
        _time: &ObservationTime,
    ) -> SkyMapResult<SkyPosition> {
        SkyPosition::new(90.0, 0.0)
    }
}

#[test]
fn test_zenith_body_plots_at_radius_zero() {
    let engine = PositionEngine::new(
        Arc::new(ZenithSky),
        Arc::new(StarCatalog::default()),
        vec![CelestialBody::Sun],
    );
    let objects = engine
        .compute(
            &Observer::new(0.0, 0.0).unwrap(),
            &ObservationTime::new(2024, 3, 20, 12).unwrap(),
        )
        .unwrap();
    let chart = render_objects(&objects, &RenderStyle::default());
    assert_eq!(chart.data.len(), 1);
    assert_eq!(chart.data[0].r, vec![0.0]);
}

/// Places stars at an altitude equal to their catalogue declination.
struct DeclinationSky;

impl EphemerisProvider for DeclinationSky {
    fn altaz(
        &self,
        target: Target<'_>,
        _observer: &Observer,
        _time: &ObservationTime,
    ) -> SkyMapResult<SkyPosition> {
        match target {
            Target::Star(star) => SkyPosition::new(star.position.dec.value(), 10.0),
            Target::Body(_) => SkyPosition::new(-5.0, 0.0),
        }
    }
}

fn entry(hip: u32, magnitude: f64, dec: f64) -> StarCatalogEntry {
    StarCatalogEntry {
        id: HipparcosId::new(hip),
        magnitude,
        position: CatalogPosition {
            ra: qtty::Degrees::new(0.0),
            dec: qtty::Degrees::new(dec),
            pm_ra_mas_per_year: 0.0,
            pm_dec_mas_per_year: 0.0,
            parallax_mas: 0.0,
            epoch_year: 1991.25,
        },
    }
}

proptest! {
    #[test]
    fn prop_star_size_decreasing_and_floored(m1 in -2.0f64..20.0, delta in 0.001f64..5.0) {
        let brighter = star_marker_size(m1);
        let fainter = star_marker_size(m1 + delta);
        prop_assert!(fainter <= brighter);
        prop_assert!(fainter >= 0.5);
        if brighter > 0.5 {
            prop_assert!(fainter < brighter);
        }
    }

    #[test]
    fn prop_radius_within_plot(alt in 0.0001f64..=90.0) {
        let r = plot_radius(alt);
        prop_assert!((0.0..90.0).contains(&r));
        prop_assert!((r - (90.0 - alt)).abs() < 1e-12);
    }

    #[test]
    fn prop_only_bright_stars_above_horizon_are_plotted(
        stars in prop::collection::vec((0.0f64..9.0, -90.0f64..=90.0), 0..40)
    ) {
        let entries: Vec<_> = stars
            .iter()
            .enumerate()
            .map(|(i, (mag, dec))| entry(i as u32 + 1, *mag, *dec))
            .collect();
        let engine = PositionEngine::new(
            Arc::new(DeclinationSky),
            Arc::new(StarCatalog::new(entries.clone())),
            vec![CelestialBody::Moon],
        );
        let objects = engine
            .compute(
                &Observer::new(10.0, 10.0).unwrap(),
                &ObservationTime::new(2024, 1, 1, 0).unwrap(),
            )
            .unwrap();
        prop_assert!(objects.bodies.is_empty());

        let expected: Vec<u32> = entries
            .iter()
            .filter(|e| e.magnitude < NAKED_EYE_MAGNITUDE_LIMIT && e.position.dec.value() > 0.0)
            .map(|e| e.id.value())
            .collect();
        let got: Vec<u32> = objects.stars.iter().map(|s| s.id.value()).collect();
        prop_assert_eq!(got, expected);

        let chart = render_objects(&objects, &RenderStyle::default());
        if let Some(trace) = chart.data.first() {
            match &trace.marker.size {
                OneOrMany::Many(sizes) => prop_assert_eq!(sizes.len(), objects.stars.len()),
                OneOrMany::One(_) => prop_assert!(false, "star sizes must be per point"),
            }
        }
    }
}
