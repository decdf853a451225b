use std::collections::HashMap;

/// Ward identifier → human-readable region name.
///
/// Built once from configuration and passed to whatever needs display names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionLookup {
    names: HashMap<String, String>,
}

impl RegionLookup {
    pub fn new(names: HashMap<String, String>) -> Self {
        Self { names }
    }

    /// The built-in Kochi table for `Ward-1` … `Ward-15`.
    pub fn kochi() -> Self {
        let names = [
            ("Ward-1", "Fort Kochi"),
            ("Ward-2", "Mattancherry"),
            ("Ward-3", "Palluruthy"),
            ("Ward-4", "Edakochi"),
            ("Ward-5", "Thoppumpady"),
            ("Ward-6", "Vennala"),
            ("Ward-7", "Elamkulam"),
            ("Ward-8", "Kadavanthra"),
            ("Ward-9", "Panampilly Nagar"),
            ("Ward-10", "Ernakulam South"),
            ("Ward-11", "Ernakulam North"),
            ("Ward-12", "Willingdon Island"),
            ("Ward-13", "Thevara"),
            ("Ward-14", "Perumanoor"),
            ("Ward-15", "Marine Drive"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self { names }
    }

    /// Display name for a ward.
    ///
    /// With an empty table, `Ward-7` becomes `Ward 7`. Otherwise unmapped wards
    /// keep their own name.
    pub fn region_for(&self, ward: &str) -> String {
        if self.names.is_empty() {
            return match ward.split_once('-') {
                Some((_, number)) => format!("Ward {}", number),
                None => ward.to_string(),
            };
        }

        self.names
            .get(ward)
            .cloned()
            .unwrap_or_else(|| ward.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kochi_mapping() {
        let lookup = RegionLookup::kochi();
        assert_eq!(lookup.region_for("Ward-1"), "Fort Kochi");
        assert_eq!(lookup.region_for("Ward-8"), "Kadavanthra");
        assert_eq!(lookup.region_for("Ward-15"), "Marine Drive");
    }

    #[test]
    fn test_unmapped_ward_keeps_name() {
        let lookup = RegionLookup::kochi();
        assert_eq!(lookup.region_for("Vennala"), "Vennala");
        assert_eq!(lookup.region_for("Ward-99"), "Ward-99");
    }

    #[test]
    fn test_empty_lookup_formats_ward_number() {
        let lookup = RegionLookup::default();
        assert_eq!(lookup.region_for("Ward-7"), "Ward 7");
        assert_eq!(lookup.region_for("Kadavanthra"), "Kadavanthra");
    }
}
