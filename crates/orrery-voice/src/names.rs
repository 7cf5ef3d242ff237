use orrery_scene::CelestialBody;

/// Spoken variants, checked in order. Portuguese first, then English, with
/// accented and plain spellings side by side.
///
/// Matching is by substring and the first hit wins, so short names can fire
/// inside longer words: "sol" matches "solar", which focuses the sun.
const SPOKEN_NAMES: &[(&str, CelestialBody)] = &[
    ("sol", CelestialBody::Sun),
    ("sun", CelestialBody::Sun),
    ("mercúrio", CelestialBody::Mercury),
    ("mercurio", CelestialBody::Mercury),
    ("mercury", CelestialBody::Mercury),
    ("vênus", CelestialBody::Venus),
    ("venus", CelestialBody::Venus),
    ("terra", CelestialBody::Earth),
    ("earth", CelestialBody::Earth),
    ("marte", CelestialBody::Mars),
    ("mars", CelestialBody::Mars),
    ("júpiter", CelestialBody::Jupiter),
    ("jupiter", CelestialBody::Jupiter),
    ("saturno", CelestialBody::Saturn),
    ("saturn", CelestialBody::Saturn),
    ("urano", CelestialBody::Uranus),
    ("uranus", CelestialBody::Uranus),
    ("netuno", CelestialBody::Neptune),
    ("neptune", CelestialBody::Neptune),
    ("plutão", CelestialBody::Pluto),
    ("plutao", CelestialBody::Pluto),
    ("pluto", CelestialBody::Pluto),
];

/// Find the body named in a recognized transcript.
pub fn resolve(transcript: &str) -> Option<CelestialBody> {
    let normalized = transcript.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }
    SPOKEN_NAMES
        .iter()
        .find(|(name, _)| normalized.contains(name))
        .map(|&(_, body)| body)
}
