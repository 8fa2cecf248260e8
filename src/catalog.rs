use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Planet
// ---------------------------------------------------------------------------

/// Planetary body a recording was made on.  The lowercase name is what the
/// service expects in the URL path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Planet {
    Mars,
    Moon,
}

impl Planet {
    pub const ALL: [Planet; 2] = [Planet::Mars, Planet::Moon];

    pub fn as_str(&self) -> &'static str {
        match self {
            Planet::Mars => "mars",
            Planet::Moon => "moon",
        }
    }

    /// Known recordings for this body, in catalog order.
    pub fn filenames(&self) -> &'static [&'static str] {
        filenames(*self)
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Planet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mars" => Ok(Planet::Mars),
            "moon" => Ok(Planet::Moon),
            other => Err(format!("unknown planet '{other}' (expected mars or moon)")),
        }
    }
}

// ---------------------------------------------------------------------------
// Static catalogs
// ---------------------------------------------------------------------------

/// InSight SEIS very-broadband recordings.
pub const MARS_FILENAMES: &[&str] = &[
    "XB.ELYSE.02.BHV.2022-01-02HR04_evid0006.json",
    "XB.ELYSE.02.BHV.2022-02-03HR08_evid0005.json",
    "XB.ELYSE.02.BHV.2019-05-23HR02_evid0041.json",
    "XB.ELYSE.02.BHV.2021-10-11HR23_evid0011.json",
    "XB.ELYSE.02.BHV.2019-07-26HR12_evid0033.json",
    "XB.ELYSE.02.BHV.2021-12-24HR22_evid0007.json",
    "XB.ELYSE.02.BHV.2019-07-26HR12_evid0034.json",
    "XB.ELYSE.02.BHV.2022-04-09HR22_evid0002.json",
    "XB.ELYSE.02.BHV.2019-09-21HR03_evid0032.json",
    "XB.ELYSE.02.BHV.2022-05-04HR23_evid0001.json",
    "XB.ELYSE.02.BHV.2021-05-02HR01_evid0017.json",
];

/// Apollo 12 passive seismic experiment recordings.
pub const MOON_FILENAMES: &[&str] = &[
    "xa.s12.00.mhz.1970-01-19HR00_evid00002.json",
    "xa.s12.00.mhz.1970-03-26HR00_evid00004.json",
    "xa.s12.00.mhz.1970-03-14HR00_evid00018.json",
    "xa.s12.00.mhz.1971-01-03HR00_evid00057.json",
    "xa.s12.00.mhz.1970-03-25HR00_evid00003.json",
    "xa.s12.00.mhz.1971-06-11HR00_evid00096.json",
];

pub fn filenames(planet: Planet) -> &'static [&'static str] {
    match planet {
        Planet::Mars => MARS_FILENAMES,
        Planet::Moon => MOON_FILENAMES,
    }
}

// ---------------------------------------------------------------------------
// RecordingId – identity encoded in a catalog filename
// ---------------------------------------------------------------------------

/// The pieces of a name like `XB.ELYSE.02.BHV.2022-01-02HR04_evid0006.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingId {
    pub network: String,
    pub station: String,
    pub location: String,
    pub channel: String,
    /// `YYYY-MM-DD` as written in the filename.
    pub date: String,
    pub hour: u8,
    /// Event id including its `evid` prefix, e.g. `evid0006`.
    pub event_id: String,
}

impl RecordingId {
    /// Parse a catalog filename.  Returns `None` for anything that does not
    /// follow the `NET.STA.LOC.CHA.DATEHRhh_evidN` layout.
    pub fn parse(filename: &str) -> Option<Self> {
        let stem = filename.strip_suffix(".json").unwrap_or(filename);

        let mut parts = stem.splitn(5, '.');
        let network = parts.next()?;
        let station = parts.next()?;
        let location = parts.next()?;
        let channel = parts.next()?;
        let rest = parts.next()?;

        // rest: 2022-01-02HR04_evid0006
        let (stamp, event_id) = rest.split_once('_')?;
        let upper = stamp.to_ascii_uppercase();
        let hr = upper.find("HR")?;
        let date = &stamp[..hr];
        let hour: u8 = stamp[hr + 2..].parse().ok()?;

        if hour > 23 || date.len() != 10 || !event_id.to_ascii_lowercase().starts_with("evid") {
            return None;
        }

        Some(RecordingId {
            network: network.to_string(),
            station: station.to_string(),
            location: location.to_string(),
            channel: channel.to_string(),
            date: date.to_string(),
            hour,
            event_id: event_id.to_string(),
        })
    }

    /// Short label for selection widgets, e.g. `ELYSE BHV 2022-01-02 04h (evid0006)`.
    pub fn label(&self) -> String {
        format!(
            "{} {} {} {:02}h ({})",
            self.station, self.channel, self.date, self.hour, self.event_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_catalog_entry_parses() {
        for name in MARS_FILENAMES {
            let id = RecordingId::parse(name).unwrap();
            assert_eq!(id.network, "XB");
            assert_eq!(id.station, "ELYSE");
            assert_eq!(id.channel, "BHV");
        }
        for name in MOON_FILENAMES {
            let id = RecordingId::parse(name).unwrap();
            assert_eq!(id.network, "xa");
            assert_eq!(id.station, "s12");
            assert_eq!(id.channel, "mhz");
        }
    }

    #[test]
    fn parses_fields_of_a_mars_recording() {
        let id = RecordingId::parse("XB.ELYSE.02.BHV.2022-01-02HR04_evid0006.json").unwrap();
        assert_eq!(id.location, "02");
        assert_eq!(id.date, "2022-01-02");
        assert_eq!(id.hour, 4);
        assert_eq!(id.event_id, "evid0006");
        assert_eq!(id.label(), "ELYSE BHV 2022-01-02 04h (evid0006)");
    }

    #[test]
    fn rejects_names_outside_the_layout() {
        assert!(RecordingId::parse("waveform.json").is_none());
        assert!(RecordingId::parse("a.b.c.d.2022-01-02_evid1.json").is_none());
        assert!(RecordingId::parse("a.b.c.d.2022-01-02HRxx_evid1.json").is_none());
        assert!(RecordingId::parse("a.b.c.d.2022-01-02HR24_evid1.json").is_none());
        assert!(RecordingId::parse("a.b.c.d.2022-01-02HR99_evid1.json").is_none());
        assert_eq!(RecordingId::parse("a.b.c.d.2022-01-02HR23_evid1.json").unwrap().hour, 23);
    }

    #[test]
    fn planet_names() {
        for planet in Planet::ALL {
            assert_eq!(planet.to_string().parse::<Planet>().unwrap(), planet);
        }
        assert_eq!("MARS".parse::<Planet>().unwrap(), Planet::Mars);
        assert!("venus".parse::<Planet>().is_err());
        assert_eq!(Planet::Moon.filenames().len(), 6);
        assert_eq!(filenames(Planet::Mars).len(), 11);
    }
}
