//! Country lookup for feed country tags.
//!
//! Feeds report countries as free text such as `"Pakistan-Jazz"` or
//! `"Venezuela Movilnet"`. Only the leading country word is matched.

/// Display label plus flag glyph for a country tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub flag: &'static str,
    pub name: &'static str,
}

impl Country {
    pub const UNKNOWN: Self = Self {
        flag: "🌐",
        name: "Unknown",
    };
}

/// Separator that introduces an operator or region suffix.
const SUFFIX_SEPARATOR: char = '-';

/// `(lowercase key, flag, display name)`; aliases share a display name.
const COUNTRIES: &[(&str, &str, &str)] = &[
    ("afghanistan", "🇦🇫", "Afghanistan"),
    ("albania", "🇦🇱", "Albania"),
    ("algeria", "🇩🇿", "Algeria"),
    ("angola", "🇦🇴", "Angola"),
    ("argentina", "🇦🇷", "Argentina"),
    ("australia", "🇦🇺", "Australia"),
    ("austria", "🇦🇹", "Austria"),
    ("azerbaijan", "🇦🇿", "Azerbaijan"),
    ("bangladesh", "🇧🇩", "Bangladesh"),
    ("belarus", "🇧🇾", "Belarus"),
    ("belgium", "🇧🇪", "Belgium"),
    ("benin", "🇧🇯", "Benin"),
    ("bolivia", "🇧🇴", "Bolivia"),
    ("brazil", "🇧🇷", "Brazil"),
    ("bulgaria", "🇧🇬", "Bulgaria"),
    ("cambodia", "🇰🇭", "Cambodia"),
    ("cameroon", "🇨🇲", "Cameroon"),
    ("canada", "🇨🇦", "Canada"),
    ("chile", "🇨🇱", "Chile"),
    ("china", "🇨🇳", "China"),
    ("colombia", "🇨🇴", "Colombia"),
    ("croatia", "🇭🇷", "Croatia"),
    ("cyprus", "🇨🇾", "Cyprus"),
    ("czechia", "🇨🇿", "Czechia"),
    ("denmark", "🇩🇰", "Denmark"),
    ("ecuador", "🇪🇨", "Ecuador"),
    ("egypt", "🇪🇬", "Egypt"),
    ("estonia", "🇪🇪", "Estonia"),
    ("ethiopia", "🇪🇹", "Ethiopia"),
    ("finland", "🇫🇮", "Finland"),
    ("france", "🇫🇷", "France"),
    ("georgia", "🇬🇪", "Georgia"),
    ("germany", "🇩🇪", "Germany"),
    ("ghana", "🇬🇭", "Ghana"),
    ("greece", "🇬🇷", "Greece"),
    ("guatemala", "🇬🇹", "Guatemala"),
    ("hungary", "🇭🇺", "Hungary"),
    ("india", "🇮🇳", "India"),
    ("indonesia", "🇮🇩", "Indonesia"),
    ("iran", "🇮🇷", "Iran"),
    ("iraq", "🇮🇶", "Iraq"),
    ("ireland", "🇮🇪", "Ireland"),
    ("israel", "🇮🇱", "Israel"),
    ("italy", "🇮🇹", "Italy"),
    ("ivory", "🇨🇮", "Ivory Coast"),
    ("japan", "🇯🇵", "Japan"),
    ("jordan", "🇯🇴", "Jordan"),
    ("kazakhstan", "🇰🇿", "Kazakhstan"),
    ("kenya", "🇰🇪", "Kenya"),
    ("kyrgyzstan", "🇰🇬", "Kyrgyzstan"),
    ("laos", "🇱🇦", "Laos"),
    ("latvia", "🇱🇻", "Latvia"),
    ("lithuania", "🇱🇹", "Lithuania"),
    ("madagascar", "🇲🇬", "Madagascar"),
    ("malaysia", "🇲🇾", "Malaysia"),
    ("mexico", "🇲🇽", "Mexico"),
    ("moldova", "🇲🇩", "Moldova"),
    ("morocco", "🇲🇦", "Morocco"),
    ("mozambique", "🇲🇿", "Mozambique"),
    ("myanmar", "🇲🇲", "Myanmar"),
    ("nepal", "🇳🇵", "Nepal"),
    ("netherlands", "🇳🇱", "Netherlands"),
    ("nigeria", "🇳🇬", "Nigeria"),
    ("norway", "🇳🇴", "Norway"),
    ("pakistan", "🇵🇰", "Pakistan"),
    ("paraguay", "🇵🇾", "Paraguay"),
    ("peru", "🇵🇪", "Peru"),
    ("philippines", "🇵🇭", "Philippines"),
    ("poland", "🇵🇱", "Poland"),
    ("portugal", "🇵🇹", "Portugal"),
    ("romania", "🇷🇴", "Romania"),
    ("russia", "🇷🇺", "Russia"),
    ("saudi", "🇸🇦", "Saudi Arabia"),
    ("senegal", "🇸🇳", "Senegal"),
    ("serbia", "🇷🇸", "Serbia"),
    ("slovakia", "🇸🇰", "Slovakia"),
    ("spain", "🇪🇸", "Spain"),
    ("sweden", "🇸🇪", "Sweden"),
    ("switzerland", "🇨🇭", "Switzerland"),
    ("tajikistan", "🇹🇯", "Tajikistan"),
    ("tanzania", "🇹🇿", "Tanzania"),
    ("thailand", "🇹🇭", "Thailand"),
    ("tunisia", "🇹🇳", "Tunisia"),
    ("turkey", "🇹🇷", "Turkey"),
    ("uganda", "🇺🇬", "Uganda"),
    ("ukraine", "🇺🇦", "Ukraine"),
    ("uk", "🇬🇧", "United Kingdom"),
    ("england", "🇬🇧", "United Kingdom"),
    ("usa", "🇺🇸", "United States"),
    ("us", "🇺🇸", "United States"),
    ("uzbekistan", "🇺🇿", "Uzbekistan"),
    ("venezuela", "🇻🇪", "Venezuela"),
    ("vietnam", "🇻🇳", "Vietnam"),
    ("yemen", "🇾🇪", "Yemen"),
    ("zambia", "🇿🇲", "Zambia"),
    ("zimbabwe", "🇿🇼", "Zimbabwe"),
];

/// Resolve a raw feed country tag.
///
/// Drops any suffix after the first `-`, takes the first whitespace token and
/// matches it case-insensitively. Returns [`Country::UNKNOWN`] otherwise.
#[must_use]
pub fn lookup(country_tag: &str) -> Country {
    let head = country_tag
        .split(SUFFIX_SEPARATOR)
        .next()
        .unwrap_or_default();
    let Some(token) = head.split_whitespace().next() else {
        return Country::UNKNOWN;
    };
    let token = token.to_lowercase();

    COUNTRIES
        .iter()
        .find(|(key, _, _)| *key == token)
        .map_or(Country::UNKNOWN, |&(_, flag, name)| Country { flag, name })
}
