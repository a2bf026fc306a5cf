use crate::error::Result;
use crate::settings::{load_settings, save_settings};

pub fn run(
    data_dir: Option<String>,
    out_dir: Option<String>,
    company: Option<String>,
) -> Result<()> {
    let mut settings = load_settings();
    if let Some(d) = data_dir {
        settings.data_dir = d;
    }
    if let Some(d) = out_dir {
        settings.out_dir = d;
    }
    if let Some(c) = company {
        settings.company_name = c;
    }
    save_settings(&settings)?;
    println!("Settings saved.");
    println!("  data dir: {}", settings.data_dir);
    println!("  out dir:  {}", settings.out_dir);
    println!("  company:  {}", settings.company_name);
    Ok(())
}
