//! Common regex patterns for notification text.

use lazy_static::lazy_static;
use regex::Regex;

/// One weekday token: `MON`, `TUES`, `Thursday`, `SATURDAYS`.
const DAY: &str = r"(?:MON(?:DAY)?|TUE(?:S(?:DAY)?)?|WED(?:NESDAY)?|THU(?:R(?:S(?:DAY)?)?)?|FRI(?:DAY)?|SAT(?:URDAY)?|SUN(?:DAY)?)S?\b";

/// Joiner between list items.
const JOIN: &str = r"(?:,|/|&|\+|\bAND\b)";

/// Hours unit after a number.
const HOURS_UNIT: &str = r"(?:HOURS?|HRS?|H)\b";

/// Holiday token.
const HOL: &str = r"(?:HOL(?:IDAYS?)?|PH)\b";

lazy_static! {
    // Availability markers
    pub static ref H24_MARKER: Regex = Regex::new(
        r"(?i)\bH24\b|\bno\s+(?:PPR|PN|prior\s+not(?:ice|ification))\s+(?:is\s+)?(?:required|needed|necessary)\b"
    ).unwrap();

    pub static ref ON_REQUEST: Regex = Regex::new(
        r"(?i)\bO/R\b|\bon\s+req(?:uest)?\b|\bby\s+(?:prior\s+)?arrangement\b"
    ).unwrap();

    pub static ref AS_AD_HOURS: Regex = Regex::new(
        r"(?i)\bAS\s+(?:AD|AERODROME|AIRPORT)\s+(?:OPR\s+|OPERATING\s+)?(?:HOURS|HRS?)\b"
    ).unwrap();

    // Day-scoped hours: "MON-FRI: PPR 24 HR", "SAT, SUN and HOL: PN 48 HR",
    // "WEEKDAYS 12H and HOL"
    pub static ref WEEKDAY_HOURS: Regex = Regex::new(&format!(
        r"(?i)\b(?P<days>{day}(?:\s*(?:-|\x{{2013}}|\bTO\b)\s*{day})?(?:\s*{join}\s*{day})*|WEEKDAYS?\b|WEEKENDS?\b|WORKING\s+DAYS\b)(?P<hol>\s*{join}\s*{hol})?\s*[:\-\x{{2013}}]?\s*(?:(?:PPR|PN)\s*[:\-]?\s*)?(?P<hours>\d{{1,3}})\s*{unit}(?P<tail>\s*(?:{join}|\bINCL(?:UDING)?\.?)\s*{hol})?",
        day = DAY,
        join = JOIN,
        hol = HOL,
        unit = HOURS_UNIT,
    )).unwrap();

    // Unscoped hours: "PPR 24 HR", "PN: 2H", "48 hours"
    pub static ref HOURS_NOTICE: Regex = Regex::new(&format!(
        r"(?i)\b(?:(?:PPR|PN)\s*[:\-]?\s*)?(?P<hours>\d{{1,3}})\s*{unit}",
        unit = HOURS_UNIT,
    )).unwrap();

    // "(last) working/business day (before 1500)"
    pub static ref BUSINESS_DAY: Regex = Regex::new(
        r"(?i)\b(?:(?P<last>last)\s+)?(?:working|business)\s+day\b(?:[^.;\n]*?\b(?:before|until|by|NLT)\s+(?P<time>\d{4})\b)?"
    ).unwrap();

    // Day vocabulary
    pub static ref DAY_TOKEN: Regex = Regex::new(&format!(r"(?i)\b{}", DAY)).unwrap();

    pub static ref DAY_RANGE: Regex = Regex::new(&format!(
        r"(?i)\b{day}\s*(?:-|\x{{2013}}|\bTO\b)\s*{day}",
        day = DAY,
    )).unwrap();

    pub static ref HOLIDAY_TOKEN: Regex = Regex::new(&format!(r"(?i)\b{}", HOL)).unwrap();

    // Complexity markers
    pub static ref SCHENGEN: Regex = Regex::new(r"(?i)schengen").unwrap();

    pub static ref PROHIBITION: Regex = Regex::new(
        r"(?i)\b(?:PROHIBITED|FORBIDDEN|CLOSED|NOT\s+(?:PERMITTED|ALLOWED|AVBL|AVAILABLE|POSSIBLE))\b"
    ).unwrap();

    pub static ref TIME_CUTOFF: Regex = Regex::new(
        r"(?i)\b(?:before|until|till|by|NLT)\s+\d{4}\b"
    ).unwrap();

    pub static ref OPERATING_HOURS: Regex = Regex::new(
        r"(?i)\b(?:opening|closing|operating|OPR)\s+(?:hours|times?|HRS?)\b"
    ).unwrap();

    pub static ref CONDITIONAL: Regex = Regex::new(
        r"(?i)\b(?:if|when|during|except|unless|provided)\b"
    ).unwrap();

    // Schengen scope
    pub static ref NON_SCHENGEN: Regex = Regex::new(
        r"(?i)\b(?:non|extra)[\s\-]?schengen\b|\boutside\s+(?:the\s+)?schengen\b"
    ).unwrap();

    pub static ref WITHIN_SCHENGEN: Regex = Regex::new(
        r"(?i)\bwithin\s+(?:the\s+)?schengen\b|\bschengen[\s\-]only\b|\bintra[\s\-]?schengen\b"
    ).unwrap();
}
