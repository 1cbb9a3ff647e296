use super::translations::Translations;

/// (ISO code, de, en, fr, it)
const COUNTRIES: &[(&str, &str, &str, &str, &str)] = &[
    ("AT", "Österreich", "Austria", "Autriche", "Austria"),
    ("BE", "Belgien", "Belgium", "Belgique", "Belgio"),
    ("BG", "Bulgarien", "Bulgaria", "Bulgarie", "Bulgaria"),
    ("CH", "Schweiz", "Switzerland", "Suisse", "Svizzera"),
    ("CY", "Zypern", "Cyprus", "Chypre", "Cipro"),
    ("CZ", "Tschechien", "Czechia", "Tchéquie", "Cechia"),
    ("DE", "Deutschland", "Germany", "Allemagne", "Germania"),
    ("DK", "Dänemark", "Denmark", "Danemark", "Danimarca"),
    ("EE", "Estland", "Estonia", "Estonie", "Estonia"),
    ("ES", "Spanien", "Spain", "Espagne", "Spagna"),
    ("FI", "Finnland", "Finland", "Finlande", "Finlandia"),
    ("FR", "Frankreich", "France", "France", "Francia"),
    ("GB", "Vereinigtes Königreich", "United Kingdom", "Royaume-Uni", "Regno Unito"),
    ("GR", "Griechenland", "Greece", "Grèce", "Grecia"),
    ("HR", "Kroatien", "Croatia", "Croatie", "Croazia"),
    ("HU", "Ungarn", "Hungary", "Hongrie", "Ungheria"),
    ("IE", "Irland", "Ireland", "Irlande", "Irlanda"),
    ("IT", "Italien", "Italy", "Italie", "Italia"),
    ("LT", "Litauen", "Lithuania", "Lituanie", "Lituania"),
    ("LU", "Luxemburg", "Luxembourg", "Luxembourg", "Lussemburgo"),
    ("LV", "Lettland", "Latvia", "Lettonie", "Lettonia"),
    ("MT", "Malta", "Malta", "Malte", "Malta"),
    ("NL", "Niederlande", "Netherlands", "Pays-Bas", "Paesi Bassi"),
    ("PL", "Polen", "Poland", "Pologne", "Polonia"),
    ("PT", "Portugal", "Portugal", "Portugal", "Portogallo"),
    ("RO", "Rumänien", "Romania", "Roumanie", "Romania"),
    ("SE", "Schweden", "Sweden", "Suède", "Svezia"),
    ("SI", "Slowenien", "Slovenia", "Slovénie", "Slovenia"),
    ("SK", "Slowakei", "Slovakia", "Slovaquie", "Slovacchia"),
];

/// Country name in de/en/fr/it for an ISO 3166 alpha-2 code (case-insensitive).
pub fn country_name(code: &str) -> Option<Translations> {
    let code = code.trim();
    COUNTRIES
        .iter()
        .find(|(iso, ..)| iso.eq_ignore_ascii_case(code))
        .map(|(_, de, en, fr, it)| {
            Translations::new()
                .with("de", *de)
                .with("en", *en)
                .with("fr", *fr)
                .with("it", *it)
        })
}
