//! Regions: detection of the region column and the canonical list used in reports.

use crate::config::{Table, UNKNOWN_REGION};

/// The column names that may hold the region of a record, by priority.
pub const REGION_COLUMN_CANDIDATES: [&str; 7] = [
    "State",
    "state",
    "State Name",
    "state_name",
    "State/UT",
    "Location",
    "Address",
];

/// A region that is expected to appear in the reports, with its approximate centroid.
#[derive(PartialEq, Debug, Clone)]
pub struct CanonicalRegion {
    pub name: String,
    pub coordinates: Option<(f64, f64)>,
}

impl CanonicalRegion {
    pub fn named(name: &str) -> CanonicalRegion {
        CanonicalRegion {
            name: name.to_string(),
            coordinates: region_centroid(name),
        }
    }
}

// The states and union territories of India (latitude, longitude).
const INDIAN_REGIONS: [(&str, f64, f64); 36] = [
    ("Andhra Pradesh", 15.9129, 79.7400),
    ("Arunachal Pradesh", 28.2711, 94.7278),
    ("Assam", 26.1433, 91.7898),
    ("Bihar", 25.0961, 85.3131),
    ("Chhattisgarh", 21.2787, 81.8661),
    ("Goa", 15.2993, 74.1240),
    ("Gujarat", 22.2587, 71.1924),
    ("Haryana", 29.0588, 76.0856),
    ("Himachal Pradesh", 31.1048, 77.1734),
    ("Jharkhand", 23.6102, 85.2799),
    ("Karnataka", 15.3173, 75.7139),
    ("Kerala", 10.8505, 76.2711),
    ("Madhya Pradesh", 22.9734, 78.6569),
    ("Maharashtra", 19.7515, 75.7139),
    ("Manipur", 24.6637, 93.9063),
    ("Meghalaya", 25.4670, 91.9563),
    ("Mizoram", 23.1645, 92.9376),
    ("Nagaland", 26.1584, 94.5624),
    ("Odisha", 20.9517, 85.0985),
    ("Punjab", 31.1471, 75.3412),
    ("Rajasthan", 27.0238, 74.2179),
    ("Sikkim", 27.5330, 88.5122),
    ("Tamil Nadu", 11.1271, 78.6569),
    ("Telangana", 18.1124, 79.0193),
    ("Tripura", 23.9408, 91.8700),
    ("Uttar Pradesh", 26.8467, 80.9462),
    ("Uttarakhand", 30.0668, 79.0193),
    ("West Bengal", 22.9868, 87.8550),
    ("Andaman and Nicobar Islands", 11.7401, 92.6586),
    ("Chandigarh", 30.7333, 76.7794),
    ("Dadra and Nagar Haveli and Daman and Diu", 20.1809, 73.0169),
    ("Delhi", 28.7041, 77.1025),
    ("Jammu and Kashmir", 33.7782, 76.5762),
    ("Ladakh", 34.1526, 77.5771),
    ("Lakshadweep", 10.5667, 72.6417),
    ("Puducherry", 11.9416, 79.8083),
];

/// The default canonical regions, in reporting order.
pub fn default_regions() -> Vec<CanonicalRegion> {
    INDIAN_REGIONS
        .iter()
        .map(|(name, lat, lon)| CanonicalRegion {
            name: name.to_string(),
            coordinates: Some((*lat, *lon)),
        })
        .collect()
}

/// The centroid of a known region, if any.
pub fn region_centroid(name: &str) -> Option<(f64, f64)> {
    INDIAN_REGIONS
        .iter()
        .find(|(n, _, _)| *n == name)
        .map(|(_, lat, lon)| (*lat, *lon))
}

/// The region of every row of the table.
///
/// The first column of `candidates` present in the table is used. Missing
/// cells, or the absence of any candidate column, give [UNKNOWN_REGION].
pub fn extract_regions<S: AsRef<str>>(table: &Table, candidates: &[S]) -> Vec<String> {
    let col = candidates
        .iter()
        .find_map(|c| table.column_index(c.as_ref()));
    (0..table.len())
        .map(|row| {
            col.and_then(|c| table.cell(row, c))
                .unwrap_or(UNKNOWN_REGION)
                .to_string()
        })
        .collect()
}
