//! RFC 5545 RRULE rendering for publishing rules to iCalendar consumers.

use chrono::Weekday;

use super::{Anchor, Frequency, RecurringRule};

const fn weekday_code(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "SU",
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
    }
}

impl RecurringRule {
    /// ## Summary
    /// Renders the rule as an RFC 5545 RRULE value (without the `RRULE:` prefix).
    ///
    /// Day-of-month anchors past 28 are written as the last of the candidate
    /// days 28..=anchor (`BYSETPOS=-1`), which expresses the clamp-to-month-end
    /// behavior of the expander instead of RFC 5545's skip-the-month default.
    /// `end_date` becomes a DATE-valued `UNTIL`.
    #[must_use]
    pub fn to_rrule(&self) -> String {
        let mut rrule = match self.frequency() {
            Frequency::Daily => "FREQ=DAILY".to_string(),
            Frequency::Weekly => "FREQ=WEEKLY".to_string(),
            Frequency::BiWeekly => "FREQ=WEEKLY;INTERVAL=2".to_string(),
            Frequency::Monthly => "FREQ=MONTHLY".to_string(),
            Frequency::Yearly => "FREQ=YEARLY".to_string(),
        };

        match self.anchor() {
            Some(Anchor::Weekday(weekday)) => {
                rrule.push_str(";BYDAY=");
                rrule.push_str(weekday_code(weekday));
            }
            Some(Anchor::MonthDay(day)) if day > 28 => {
                let days: Vec<String> = (28..=day).map(|d| d.to_string()).collect();
                rrule.push_str(&format!(";BYMONTHDAY={};BYSETPOS=-1", days.join(",")));
            }
            Some(Anchor::MonthDay(day)) => {
                rrule.push_str(&format!(";BYMONTHDAY={day}"));
            }
            None => {}
        }

        if let Some(end_date) = self.end_date() {
            rrule.push_str(&format!(";UNTIL={}", end_date.format("%Y%m%d")));
        }

        rrule
    }
}
