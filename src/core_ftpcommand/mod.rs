// Here's the list of the FTP commands implemented
pub mod allo;
pub mod cdup;
pub mod cwd;
pub mod dele;
pub mod list;
pub mod mdtm;
pub mod mkd;
pub mod pass;
pub mod pwd;
pub mod quit;
pub mod rest;
pub mod retr;
pub mod rmd;
pub mod rnfr;
pub mod rnto;
pub mod size;
pub mod stor;
pub mod syst;
pub mod type_;
pub mod user;

// Verb parsing, dispatch and shared checks
pub mod ftpcommand;
pub mod handlers;
pub mod utils;
