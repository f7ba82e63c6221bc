use chrono::{Datelike, Days, NaiveDate, Weekday};

use super::{HolidaySource, RawHoliday, easter_sunday};
use crate::errors::AppResult;

pub const DE_REGIONS: [&str; 16] = [
    "BW", "BY", "BE", "BB", "HB", "HH", "HE", "MV", "NI", "NW", "RP", "SL", "SN", "ST", "SH", "TH",
];
pub const GB_REGIONS: [&str; 4] = ["ENG", "WLS", "SCT", "NIR"];

/// Statutory holidays computed from calendar rules, for Germany (`DE`) and
/// the United Kingdom (`GB`).
///
/// Like a real holiday database it also reports observances and weekend
/// substitute days; callers decide what counts as work-free. An empty region
/// yields the country-wide holidays only.
pub struct BuiltinCalendar;

impl BuiltinCalendar {
    pub fn regions(country: &str) -> &'static [&'static str] {
        match country.trim().to_uppercase().as_str() {
            "DE" => &DE_REGIONS,
            "GB" | "UK" => &GB_REGIONS,
            _ => &[],
        }
    }
}

impl HolidaySource for BuiltinCalendar {
    fn fetch(&self, year: i32, country: &str, region: &str) -> AppResult<Vec<RawHoliday>> {
        let region = region.trim().to_uppercase();
        let found = match country.trim().to_uppercase().as_str() {
            "DE" => germany(year, &region),
            "GB" | "UK" => united_kingdom(year, &region),
            _ => None,
        };
        Ok(found.unwrap_or_default())
    }
}

fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

fn offset(base: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        base.checked_add_days(Days::new(days as u64))
    } else {
        base.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let next_first = if month == 12 {
        ymd(year + 1, 1, 1)?
    } else {
        ymd(year, month + 1, 1)?
    };
    let mut d = next_first.pred_opt()?;
    while d.weekday() != weekday {
        d = d.pred_opt()?;
    }
    Some(d)
}

fn germany(year: i32, region: &str) -> Option<Vec<RawHoliday>> {
    if !region.is_empty() && !DE_REGIONS.contains(&region) {
        return None;
    }
    let easter = easter_sunday(year)?;
    let in_region = |list: &[&str]| list.contains(&region);

    let mut out = vec![
        RawHoliday::new(ymd(year, 1, 1)?, "Neujahr", "public"),
        RawHoliday::new(offset(easter, -2)?, "Karfreitag", "public"),
        RawHoliday::new(offset(easter, 1)?, "Ostermontag", "public"),
        RawHoliday::new(ymd(year, 5, 1)?, "Tag der Arbeit", "public"),
        RawHoliday::new(offset(easter, 39)?, "Christi Himmelfahrt", "public"),
        RawHoliday::new(offset(easter, 50)?, "Pfingstmontag", "public"),
        RawHoliday::new(ymd(year, 10, 3)?, "Tag der Deutschen Einheit", "public"),
        RawHoliday::new(ymd(year, 12, 25)?, "1. Weihnachtstag", "public"),
        RawHoliday::new(ymd(year, 12, 26)?, "2. Weihnachtstag", "public"),
        // Non-statutory days a holiday database reports alongside.
        RawHoliday::new(ymd(year, 2, 14)?, "Valentinstag", "observance"),
        RawHoliday::new(
            NaiveDate::from_weekday_of_month_opt(year, 5, Weekday::Sun, 2)?,
            "Muttertag",
            "observance",
        ),
        RawHoliday::new(ymd(year, 12, 24)?, "Heiligabend", "optional"),
        RawHoliday::new(ymd(year, 12, 31)?, "Silvester", "optional"),
    ];

    if in_region(&["BW", "BY", "ST"]) {
        out.push(RawHoliday::new(ymd(year, 1, 6)?, "Heilige Drei Könige", "public"));
    }
    if (region == "BE" && year >= 2019) || (region == "MV" && year >= 2023) {
        out.push(RawHoliday::new(
            ymd(year, 3, 8)?,
            "Internationaler Frauentag",
            "public",
        ));
    }
    if in_region(&["BB"]) {
        out.push(RawHoliday::new(easter, "Ostersonntag", "public"));
        out.push(RawHoliday::new(offset(easter, 49)?, "Pfingstsonntag", "public"));
    }
    if in_region(&["BW", "BY", "HE", "NW", "RP", "SL"]) {
        out.push(RawHoliday::new(offset(easter, 60)?, "Fronleichnam", "public"));
    }
    if in_region(&["SL"]) {
        out.push(RawHoliday::new(ymd(year, 8, 15)?, "Mariä Himmelfahrt", "public"));
    }
    if region == "TH" && year >= 2019 {
        out.push(RawHoliday::new(ymd(year, 9, 20)?, "Weltkindertag", "public"));
    }
    let reformation = in_region(&["BB", "MV", "SN", "ST", "TH"])
        || (year >= 2018 && in_region(&["HB", "HH", "NI", "SH"]));
    if reformation {
        out.push(RawHoliday::new(ymd(year, 10, 31)?, "Reformationstag", "public"));
    }
    if in_region(&["BW", "BY", "NW", "RP", "SL"]) {
        out.push(RawHoliday::new(ymd(year, 11, 1)?, "Allerheiligen", "public"));
    }
    if in_region(&["SN"]) {
        // Wednesday before 23 November.
        let mut d = ymd(year, 11, 22)?;
        while d.weekday() != Weekday::Wed {
            d = d.pred_opt()?;
        }
        out.push(RawHoliday::new(d, "Buß- und Bettag", "public"));
    }

    Some(out)
}

fn united_kingdom(year: i32, region: &str) -> Option<Vec<RawHoliday>> {
    if !region.is_empty() && !GB_REGIONS.contains(&region) {
        return None;
    }
    let easter = easter_sunday(year)?;
    let scotland = region == "SCT";

    // Fixed-date holidays move to the next free weekday when they fall on a
    // weekend; the original date is still reported.
    let mut fixed = vec![(ymd(year, 1, 1)?, "New Year's Day")];
    if scotland {
        fixed.push((ymd(year, 1, 2)?, "2nd January"));
    }
    if region == "NIR" {
        fixed.push((ymd(year, 3, 17)?, "St Patrick's Day"));
        fixed.push((ymd(year, 7, 12)?, "Battle of the Boyne"));
    }
    if scotland {
        fixed.push((ymd(year, 11, 30)?, "St Andrew's Day"));
    }
    fixed.push((ymd(year, 12, 25)?, "Christmas Day"));
    fixed.push((ymd(year, 12, 26)?, "Boxing Day"));

    let mut out: Vec<RawHoliday> = fixed
        .iter()
        .map(|(d, name)| RawHoliday::new(*d, name, "bank"))
        .collect();

    out.push(RawHoliday::new(offset(easter, -2)?, "Good Friday", "bank"));
    if !scotland {
        out.push(RawHoliday::new(offset(easter, 1)?, "Easter Monday", "bank"));
    }
    out.push(RawHoliday::new(
        NaiveDate::from_weekday_of_month_opt(year, 5, Weekday::Mon, 1)?,
        "Early May bank holiday",
        "bank",
    ));
    out.push(RawHoliday::new(
        last_weekday_of_month(year, 5, Weekday::Mon)?,
        "Spring bank holiday",
        "bank",
    ));
    let summer = if scotland {
        NaiveDate::from_weekday_of_month_opt(year, 8, Weekday::Mon, 1)?
    } else {
        last_weekday_of_month(year, 8, Weekday::Mon)?
    };
    out.push(RawHoliday::new(summer, "Summer bank holiday", "bank"));
    out.push(RawHoliday::new(ymd(year, 2, 14)?, "Valentine's Day", "observance"));

    let mut taken: Vec<NaiveDate> = out
        .iter()
        .filter(|h| h.kind == "bank")
        .filter_map(|h| NaiveDate::parse_from_str(&h.date, "%Y-%m-%d").ok())
        .collect();
    for (date, name) in &fixed {
        if !is_weekend(*date) {
            continue;
        }
        let mut sub = date.succ_opt()?;
        while is_weekend(sub) || taken.contains(&sub) {
            sub = sub.succ_opt()?;
        }
        taken.push(sub);
        out.push(RawHoliday::new(sub, &format!("{name} (substitute day)"), "bank").substitute());
    }

    Some(out)
}

fn is_weekend(d: NaiveDate) -> bool {
    matches!(d.weekday(), Weekday::Sat | Weekday::Sun)
}
