#[derive(Eq, Hash, PartialEq, Debug, Clone, Copy)]
pub enum FtpCommand {
    USER,
    PASS,
    SYST,
    PASV,
    CDUP,
    CWD,
    PWD,
    LIST,
    TYPE,
    SIZE,
    MDTM,
    MKD,
    RMD,
    DELE,
    ALLO,
    REST,
    RETR,
    STOR,
    APPE,
    RNFR,
    RNTO,
    QUIT,
}

impl FtpCommand {
    pub fn from_str(cmd: &str) -> Option<FtpCommand> {
        match cmd.to_ascii_uppercase().as_str() {
            "USER" => Some(FtpCommand::USER),
            "PASS" => Some(FtpCommand::PASS),
            "SYST" => Some(FtpCommand::SYST),
            "PASV" => Some(FtpCommand::PASV),
            "CDUP" => Some(FtpCommand::CDUP),
            "CWD" => Some(FtpCommand::CWD),
            "PWD" => Some(FtpCommand::PWD),
            "LIST" => Some(FtpCommand::LIST),
            "TYPE" => Some(FtpCommand::TYPE),
            "SIZE" => Some(FtpCommand::SIZE),
            "MDTM" => Some(FtpCommand::MDTM),
            "MKD" => Some(FtpCommand::MKD),
            "RMD" => Some(FtpCommand::RMD),
            "DELE" => Some(FtpCommand::DELE),
            "ALLO" => Some(FtpCommand::ALLO),
            "REST" => Some(FtpCommand::REST),
            "RETR" => Some(FtpCommand::RETR),
            "STOR" => Some(FtpCommand::STOR),
            "APPE" => Some(FtpCommand::APPE),
            "RNFR" => Some(FtpCommand::RNFR),
            "RNTO" => Some(FtpCommand::RNTO),
            "QUIT" => Some(FtpCommand::QUIT),
            _ => None,
        }
    }
}

/// Splits a control line into its uppercased verb and the rest of the line.
///
/// The argument keeps interior spaces so paths with spaces survive.
pub fn split_command_line(line: &str) -> (String, String) {
    let trimmed = line.trim_matches(|c| c == '\r' || c == '\n' || c == ' ');
    let mut parts = trimmed.splitn(2, ' ');
    let verb = parts.next().unwrap_or_default().to_ascii_uppercase();
    let arg = parts.next().unwrap_or_default().to_string();
    (verb, arg)
}
