//! Built-in dynamic content producers.

use chrono::Duration;

use crate::i18n::{country_name, Catalog, Translations};
use crate::questionnaire::Questionnaire;

use super::registry::DynamicError;

pub const RESPONSE_STATISTICS: &str = "ResponseStatistics";
pub const PERSONAL_LINK: &str = "PersonalLink";
pub const HAS_EURO_QUESTION: &str = "HasEuroQuestion";
pub const FEDERAL_STATE_MEDIAN: &str = "FederalStateAboveOrBelowMedian";
pub const PARTNER_LOGOS: &str = "PatLogos";

pub const ATTR_EURO_MEMBER: &str = "euro-member";
pub const ATTR_COUNTRY: &str = "country";
pub const ATTR_MEDIAN: &str = "aboveOrBelowMedian";

pub(crate) const DATE_TIME_FORMAT: &str = "%d.%m.%Y %H:%M";
const DATE_FORMAT: &str = "%d.%m.%Y";

/// Share of answered inputs plus the survey end date.
pub fn response_statistics(catalog: &Catalog, q: &Questionnaire) -> Result<String, DynamicError> {
    let stats = q.statistics();
    let deadline = q.survey.deadline;
    let results_from = deadline + Duration::hours(24);

    let answered = stats.answered.to_string();
    let total = stats.total.to_string();
    let pct = format!("{:.0}", stats.percentage);
    let s1 = catalog.trf(
        "percentage_answered",
        &q.lang_code,
        &[&answered, &total, &pct],
    );
    let s2 = catalog.trf(
        "survey_ending",
        &q.lang_code,
        &[
            &deadline.format(DATE_TIME_FORMAT).to_string(),
            &results_from.format(DATE_FORMAT).to_string(),
        ],
    );
    Ok(s1 + &s2)
}

/// Status message depending on whether the respondent already closed the questionnaire.
pub fn personal_link(catalog: &Catalog, q: &Questionnaire) -> Result<String, DynamicError> {
    let closed = q.finished_entirely();
    tracing::debug!(closed, "personal link");
    match q.closing_time {
        Some(at) if closed => Ok(catalog.trf(
            "finished_by_participant",
            &q.lang_code,
            &[&at.format(DATE_TIME_FORMAT).to_string()],
        )),
        _ => Ok(catalog.tr("review_by_personal_link", &q.lang_code).to_string()),
    }
}

/// Currency-union statement, phrased for members and non-members of the euro area.
pub fn euro_question(q: &Questionnaire) -> Result<String, DynamicError> {
    let (Some(member), Some(country)) = (q.attrs.get(ATTR_EURO_MEMBER), q.attrs.get(ATTR_COUNTRY))
    else {
        return Err(DynamicError::MissingAttributes(vec![
            ATTR_EURO_MEMBER.to_string(),
            ATTR_COUNTRY.to_string(),
        ]));
    };

    let names = country_name(country).unwrap_or_else(|| {
        ["de", "en", "fr", "it"]
            .into_iter()
            .map(|lang| (lang, country.as_str()))
            .collect()
    });
    let name = |lang: &str| names.tr_silent(lang, "en").to_string();

    let headline = Translations::new()
        .with("de", "Wirtschaftlicher Nutzen des Euro<br>")
        .with("en", "Economic benefits of the euro<br>")
        .with("fr", "Avantages économiques de l'euro<br>")
        .with("it", "Benefici economici dell'Euro<br>");

    let statement = if member == "yes" {
        Translations::new()
            .with("de", format!("Den Euro in {} als die offizielle Währung zu haben, ist wirtschaftlich vorteilhaft.", name("de")))
            .with("en", format!("Having the euro in {} as the official currency is economically beneficial.", name("en")))
            .with("fr", format!("Avoir l'euro en {} comme monnaie officielle est économiquement avantageux.", name("fr")))
            .with("it", format!("Avere l'Euro come valuta ufficiale in {} è economicamente vantaggioso.", name("it")))
    } else {
        Translations::new()
            .with("de", format!("Den Euro in {} als offizielle Währung einzuführen, wäre wirtschaftlich vorteilhaft.", name("de")))
            .with("en", format!("Introducing the euro in {} as the official currency would be economically beneficial.", name("en")))
            .with("fr", format!("L'introduction de l'euro dans {} en tant que monnaie officielle serait économiquement avantageuse.", name("fr")))
            .with("it", format!("Introdurre l'Euro come valuta ufficiale in {} sarebbe economicamente vantaggioso.", name("it")))
    };

    let lang = q.lang_code.as_str();
    Ok(format!(
        "<b> {} </b> {}",
        headline.tr_silent(lang, "en"),
        statement.tr_silent(lang, "en")
    ))
}

/// Passes through the respondent's education-ranking comparison.
pub fn federal_state_above_or_below_median(q: &Questionnaire) -> Result<String, DynamicError> {
    q.attrs
        .get(ATTR_MEDIAN)
        .cloned()
        .ok_or_else(|| DynamicError::MissingAttributes(vec![ATTR_MEDIAN.to_string()]))
}

/// Partner institution logos.
pub fn partner_logos(url_prefix: &str) -> String {
    let logos = [
        ("/img/pat/uni-mannheim-wide.png", 61),
        ("/img/pat/uni-koeln.png", 33),
        ("/img/pat/uni-muenster.png", 50),
        ("/img/pat/uni-zurich.png", 44),
        ("/img/pat/zew.png", 28),
    ];
    let prefix = url_prefix.trim_end_matches('/');
    let mut html = String::from("<div class=\"uni-logos  logo-imgs-in-content\">\n");
    for (path, width) in logos {
        html.push_str(&format!(
            "\t<img src=\"{}{}\"  style=\"width:{}%;\"  alt=\"\"  >\n",
            prefix, path, width
        ));
    }
    html.push_str("</div>\n<br>\n");
    html
}
