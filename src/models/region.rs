use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum District {
    Angul,
    Balangir,
    Balasore,
    Bargarh,
    Bhadrak,
    Boudh,
    Cuttack,
    Deogarh,
    Dhenkanal,
    Gajapati,
    Ganjam,
    Jagatsinghpur,
    Jajpur,
    Jharsuguda,
    Kalahandi,
    Kandhamal,
    Kendrapara,
    Kendujhar,
    Khordha,
    Koraput,
    Malkangiri,
    Mayurbhanj,
    Nabarangpur,
    Nayagarh,
    Nuapada,
    Puri,
    Rayagada,
    Sambalpur,
    Sonepur,
    Sundargarh,
}

impl District {
    pub const ALL: [District; 30] = [
        District::Angul,
        District::Balangir,
        District::Balasore,
        District::Bargarh,
        District::Bhadrak,
        District::Boudh,
        District::Cuttack,
        District::Deogarh,
        District::Dhenkanal,
        District::Gajapati,
        District::Ganjam,
        District::Jagatsinghpur,
        District::Jajpur,
        District::Jharsuguda,
        District::Kalahandi,
        District::Kandhamal,
        District::Kendrapara,
        District::Kendujhar,
        District::Khordha,
        District::Koraput,
        District::Malkangiri,
        District::Mayurbhanj,
        District::Nabarangpur,
        District::Nayagarh,
        District::Nuapada,
        District::Puri,
        District::Rayagada,
        District::Sambalpur,
        District::Sonepur,
        District::Sundargarh,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            District::Angul => "Angul",
            District::Balangir => "Balangir",
            District::Balasore => "Balasore",
            District::Bargarh => "Bargarh",
            District::Bhadrak => "Bhadrak",
            District::Boudh => "Boudh",
            District::Cuttack => "Cuttack",
            District::Deogarh => "Deogarh",
            District::Dhenkanal => "Dhenkanal",
            District::Gajapati => "Gajapati",
            District::Ganjam => "Ganjam",
            District::Jagatsinghpur => "Jagatsinghpur",
            District::Jajpur => "Jajpur",
            District::Jharsuguda => "Jharsuguda",
            District::Kalahandi => "Kalahandi",
            District::Kandhamal => "Kandhamal",
            District::Kendrapara => "Kendrapara",
            District::Kendujhar => "Kendujhar",
            District::Khordha => "Khordha",
            District::Koraput => "Koraput",
            District::Malkangiri => "Malkangiri",
            District::Mayurbhanj => "Mayurbhanj",
            District::Nabarangpur => "Nabarangpur",
            District::Nayagarh => "Nayagarh",
            District::Nuapada => "Nuapada",
            District::Puri => "Puri",
            District::Rayagada => "Rayagada",
            District::Sambalpur => "Sambalpur",
            District::Sonepur => "Sonepur",
            District::Sundargarh => "Sundargarh",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
    }
}

impl std::fmt::Display for District {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for District {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::from_str(&value).ok_or_else(|| format!("unknown district '{}'", value))
    }
}

impl From<District> for String {
    fn from(value: District) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Crop {
    Paddy,
    Maize,
    Pulses,
    Groundnut,
    Sugarcane,
    Cotton,
    Jute,
}

impl Crop {
    pub const ALL: [Crop; 7] = [
        Crop::Paddy,
        Crop::Maize,
        Crop::Pulses,
        Crop::Groundnut,
        Crop::Sugarcane,
        Crop::Cotton,
        Crop::Jute,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Crop::Paddy => "Paddy",
            Crop::Maize => "Maize",
            Crop::Pulses => "Pulses",
            Crop::Groundnut => "Groundnut",
            Crop::Sugarcane => "Sugarcane",
            Crop::Cotton => "Cotton",
            Crop::Jute => "Jute",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "paddy" | "rice" => Some(Crop::Paddy),
            "maize" | "corn" => Some(Crop::Maize),
            "pulses" => Some(Crop::Pulses),
            "groundnut" | "peanut" => Some(Crop::Groundnut),
            "sugarcane" => Some(Crop::Sugarcane),
            "cotton" => Some(Crop::Cotton),
            "jute" => Some(Crop::Jute),
            _ => None,
        }
    }
}

impl std::fmt::Display for Crop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for Crop {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::from_str(&value).ok_or_else(|| format!("unknown crop '{}'", value))
    }
}

impl From<Crop> for String {
    fn from(value: Crop) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Season {
    Kharif,
    Rabi,
    Summer,
}

impl Season {
    pub const ALL: [Season; 3] = [Season::Kharif, Season::Rabi, Season::Summer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Kharif => "Kharif",
            Season::Rabi => "Rabi",
            Season::Summer => "Summer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "kharif" => Some(Season::Kharif),
            "rabi" => Some(Season::Rabi),
            "summer" | "zaid" => Some(Season::Summer),
            _ => None,
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for Season {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::from_str(&value).ok_or_else(|| format!("unknown season '{}'", value))
    }
}

impl From<Season> for String {
    fn from(value: Season) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn district_from_str_valid() {
        assert_eq!(District::from_str("Cuttack"), Some(District::Cuttack));
        assert_eq!(District::from_str("cuttack"), Some(District::Cuttack));
        assert_eq!(District::from_str("  PURI "), Some(District::Puri));
        assert_eq!(
            District::from_str("jagatsinghpur"),
            Some(District::Jagatsinghpur)
        );
    }

    #[test]
    fn district_from_str_invalid() {
        assert_eq!(District::from_str("Kolkata"), None);
        assert_eq!(District::from_str(""), None);
    }

    #[test]
    fn district_round_trip() {
        for district in District::ALL {
            assert_eq!(
                District::from_str(district.as_str()),
                Some(district),
                "Round-trip failed for {:?}",
                district
            );
        }
    }

    #[test]
    fn crop_from_str_aliases() {
        assert_eq!(Crop::from_str("Paddy"), Some(Crop::Paddy));
        assert_eq!(Crop::from_str("rice"), Some(Crop::Paddy));
        assert_eq!(Crop::from_str("GROUNDNUT"), Some(Crop::Groundnut));
        assert_eq!(Crop::from_str("wheat"), None);
    }

    #[test]
    fn season_from_str() {
        assert_eq!(Season::from_str("kharif"), Some(Season::Kharif));
        assert_eq!(Season::from_str("Rabi"), Some(Season::Rabi));
        assert_eq!(Season::from_str("summer"), Some(Season::Summer));
        assert_eq!(Season::from_str("monsoon"), None);
    }

    #[test]
    fn serde_uses_display_names() {
        let json = serde_json::to_string(&District::Mayurbhanj).unwrap();
        assert_eq!(json, "\"Mayurbhanj\"");

        let crop: Crop = serde_json::from_str("\"sugarcane\"").unwrap();
        assert_eq!(crop, Crop::Sugarcane);

        assert!(serde_json::from_str::<Season>("\"winter\"").is_err());
    }
}
