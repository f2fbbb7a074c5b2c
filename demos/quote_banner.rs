use chrono::{Duration, NaiveDate};
use facture::core::*;

fn main() {
    let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

    for offset in [-3, -1, 0, 1, 2, 3, 4, 30] {
        let valid_until = today + Duration::days(offset);
        let urgency = derive_quote_urgency(valid_until, today);
        let text = match urgency.state {
            QuoteState::Expired => format!("Devis expiré depuis {} jour(s)", -urgency.days),
            QuoteState::ExpiringSoon if urgency.days == 0 => "Devis expire aujourd'hui".to_string(),
            QuoteState::ExpiringSoon => format!("Devis expire dans {} jour(s)", urgency.days),
            QuoteState::Valid => format!("Valable jusqu'au {valid_until}"),
        };
        println!("{valid_until}  {:<14} {text}", urgency.state.as_str());
    }
}
