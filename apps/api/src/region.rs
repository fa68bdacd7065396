//! Region inference — maps free-text profile content to one of Chile's
//! 16 administrative regions.
//!
//! Resolution order: explicit region passthrough, then an ordered
//! keyword map over the lower-cased text (first match wins, not best
//! match), then an exact substring scan for canonical region names in
//! enumeration order. `None` means unknown, which downstream filtering
//! must tolerate.

/// Chile's administrative regions, in official north-to-south order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    AricaYParinacota,
    Tarapaca,
    Antofagasta,
    Atacama,
    Coquimbo,
    Valparaiso,
    Metropolitana,
    OHiggins,
    Maule,
    Nuble,
    Biobio,
    Araucania,
    LosRios,
    LosLagos,
    Aysen,
    Magallanes,
}

impl Region {
    pub const ALL: [Region; 16] = [
        Region::AricaYParinacota,
        Region::Tarapaca,
        Region::Antofagasta,
        Region::Atacama,
        Region::Coquimbo,
        Region::Valparaiso,
        Region::Metropolitana,
        Region::OHiggins,
        Region::Maule,
        Region::Nuble,
        Region::Biobio,
        Region::Araucania,
        Region::LosRios,
        Region::LosLagos,
        Region::Aysen,
        Region::Magallanes,
    ];

    /// Canonical region name as used by the search index and the
    /// scoring service.
    pub fn name(&self) -> &'static str {
        match self {
            Region::AricaYParinacota => "Región de Arica y Parinacota",
            Region::Tarapaca => "Región de Tarapacá",
            Region::Antofagasta => "Región de Antofagasta",
            Region::Atacama => "Región de Atacama",
            Region::Coquimbo => "Región de Coquimbo",
            Region::Valparaiso => "Región de Valparaíso",
            Region::Metropolitana => "Región Metropolitana de Santiago",
            Region::OHiggins => "Región del Libertador General Bernardo O'Higgins",
            Region::Maule => "Región del Maule",
            Region::Nuble => "Región de Ñuble",
            Region::Biobio => "Región del Biobío",
            Region::Araucania => "Región de La Araucanía",
            Region::LosRios => "Región de Los Ríos",
            Region::LosLagos => "Región de Los Lagos",
            Region::Aysen => "Región de Aysén del General Carlos Ibáñez del Campo",
            Region::Magallanes => "Región de Magallanes y de la Antártica Chilena",
        }
    }
}

/// Keyword → region mapping, tested against the lower-cased profile
/// text in declaration order. City names cover the common way people
/// describe where they live; accented and unaccented spellings are both
/// listed because profile text is user-typed.
const KEYWORD_REGIONS: &[(&str, Region)] = &[
    ("santiago", Region::Metropolitana),
    ("metropolitana", Region::Metropolitana),
    ("valparaiso", Region::Valparaiso),
    ("valparaíso", Region::Valparaiso),
    ("viña del mar", Region::Valparaiso),
    ("vina del mar", Region::Valparaiso),
    ("concepcion", Region::Biobio),
    ("concepción", Region::Biobio),
    ("antofagasta", Region::Antofagasta),
    ("iquique", Region::Tarapaca),
    ("arica", Region::AricaYParinacota),
    ("la serena", Region::Coquimbo),
    ("coquimbo", Region::Coquimbo),
    ("copiapo", Region::Atacama),
    ("copiapó", Region::Atacama),
    ("rancagua", Region::OHiggins),
    ("talca", Region::Maule),
    ("chillan", Region::Nuble),
    ("chillán", Region::Nuble),
    ("temuco", Region::Araucania),
    ("valdivia", Region::LosRios),
    ("puerto montt", Region::LosLagos),
    ("osorno", Region::LosLagos),
    ("coyhaique", Region::Aysen),
    ("punta arenas", Region::Magallanes),
];

/// Infers the candidate's region from profile text.
///
/// A non-empty explicit region is returned verbatim, without validation
/// against the enumeration — the caller asked for it, we do not second-
/// guess it. The keyword pass always takes precedence over the literal
/// canonical-name scan, even when the two would disagree.
pub fn infer_region(profile_text: &str, explicit_region: Option<&str>) -> Option<String> {
    if let Some(region) = explicit_region {
        if !region.is_empty() {
            return Some(region.to_string());
        }
    }

    let lowered = profile_text.to_lowercase();
    for (keyword, region) in KEYWORD_REGIONS {
        if lowered.contains(keyword) {
            return Some(region.name().to_string());
        }
    }

    // Fallback: the profile may quote a canonical name outright.
    // Case-sensitive by design — canonical names carry their own casing.
    Region::ALL
        .iter()
        .find(|r| profile_text.contains(r.name()))
        .map(|r| r.name().to_string())
}
