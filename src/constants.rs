/// Log directive for the application
pub const LOG_DIRECTIVE: &str = "birthday_mailer=info";

/// Roster file read when neither an argument nor `ROSTER_PATH` is given
pub const DEFAULT_ROSTER_PATH: &str = "data/employees.xlsx";

/// Default SMTP relay
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

/// Default SMTP submission port
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Sign-off used in the message body when `COMPANY_NAME` is unset
pub const DEFAULT_COMPANY_NAME: &str = "Your Company";

/// Subject line of every birthday email
pub const BIRTHDAY_SUBJECT: &str = "Happy Birthday!";
