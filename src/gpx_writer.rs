/// GPX 1.1 rendering of a processed flight track.
///
/// Values are written through as-is: a NaN altitude shows up as `<ele>NaN</ele>`
/// and timestamps are copied verbatim from each fix.

use std::fmt::Write;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::config::ProcessingConfig;
use crate::flight_data::Fix;
use crate::track_processor::TrackProcessor;

pub const GPX_CREATOR: &str = "Inflight Tracker";
pub const METADATA_NAME: &str = "Flight Track";
pub const TRACK_NAME: &str = "Flight Path";

/// Render an already processed track. `created_at` becomes the metadata time.
pub fn to_gpx_string(track: &[Fix], created_at: DateTime<Utc>) -> String {
    let mut gpx = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="{creator}"
     xmlns="http://www.topografix.com/GPX/1/1"
     xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
     xsi:schemaLocation="http://www.topografix.com/GPX/1/1 http://www.topografix.com/GPX/1/1/gpx.xsd">
  <metadata>
    <name>{name}</name>
    <time>{time}</time>
  </metadata>
  <trk>
    <name>{track}</name>
    <trkseg>"#,
        creator = GPX_CREATOR,
        name = METADATA_NAME,
        time = created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        track = TRACK_NAME,
    );

    for fix in track {
        // writing into a String cannot fail
        let _ = write!(
            gpx,
            r#"
      <trkpt lat="{}" lon="{}">
        <ele>{}</ele>
        <time>{}</time>
        <extensions>
          <speed>{}</speed>
          <heading>{}</heading>
        </extensions>
      </trkpt>"#,
            fix.latitude, fix.longitude, fix.altitude, fix.timestamp, fix.groundspeed, fix.heading
        );
    }

    gpx.push_str(
        r#"
    </trkseg>
  </trk>
</gpx>"#,
    );

    gpx
}

/// Process a raw track and render it, stamped with the current time.
pub fn convert_to_gpx(track: &[Fix], config: ProcessingConfig) -> String {
    let processed = TrackProcessor::new(config).process(track);
    to_gpx_string(&processed, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight_data::sample_fix;
    use chrono::TimeZone;
    use std::io::Cursor;

    fn created_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 20, 0, 0).unwrap()
    }

    #[test]
    fn test_one_trkpt_per_fix() {
        let track = vec![
            sample_fix("2024-05-01T12:00:00.000Z", 40.0, -74.0),
            sample_fix("2024-05-01T12:00:10.000Z", 40.001, -74.001),
            sample_fix("2024-05-01T12:00:20.000Z", 40.002, -74.002),
        ];
        let xml = to_gpx_string(&track, created_at());
        assert_eq!(xml.matches("<trkpt ").count(), 3);
        assert_eq!(xml.matches("</trkpt>").count(), 3);
        assert!(xml.contains("<time>2024-05-01T20:00:00.000Z</time>"));
        assert!(xml.contains("<name>Flight Track</name>"));
        assert!(xml.contains("<speed>450</speed>"));
        assert!(xml.contains("<heading>90</heading>"));
        assert!(xml.contains("<ele>35000</ele>"));
    }

    #[test]
    fn test_coordinates_written_at_full_precision() {
        let track = vec![sample_fix("2024-05-01T12:00:00.000Z", 40.123456789012345, -73.98765432109876)];
        let xml = to_gpx_string(&track, created_at());

        let lat_attr = xml.split("lat=\"").nth(1).unwrap().split('"').next().unwrap();
        let lon_attr = xml.split("lon=\"").nth(1).unwrap().split('"').next().unwrap();
        assert_eq!(lat_attr.parse::<f64>().unwrap(), track[0].latitude);
        assert_eq!(lon_attr.parse::<f64>().unwrap(), track[0].longitude);
    }

    #[test]
    fn test_output_parses_as_gpx_11() {
        let track = vec![
            sample_fix("2024-05-01T12:00:00.000Z", 40.0, -74.0),
            sample_fix("2024-05-01T12:00:10.000Z", 40.001, -74.001),
        ];
        let xml = to_gpx_string(&track, created_at());
        let parsed = gpx::read(Cursor::new(xml.as_bytes())).unwrap();

        assert_eq!(parsed.version, gpx::GpxVersion::Gpx11);
        assert_eq!(parsed.tracks.len(), 1);
        let points = &parsed.tracks[0].segments[0].points;
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].point().y(), 40.001);
        assert_eq!(points[1].point().x(), -74.001);
        assert_eq!(points[0].elevation, Some(35000.0));
    }

    #[test]
    fn test_empty_track_has_empty_segment() {
        let xml = to_gpx_string(&[], created_at());
        assert!(xml.contains("<trkseg>\n    </trkseg>"));
        assert_eq!(xml.matches("<trkpt").count(), 0);
    }

    #[test]
    fn test_nan_written_through() {
        let mut fix = sample_fix("2024-05-01T12:00:00.000Z", 1.0, 2.0);
        fix.altitude = f64::NAN;
        let xml = to_gpx_string(&[fix], created_at());
        assert!(xml.contains("<ele>NaN</ele>"));
    }

    #[test]
    fn test_convert_runs_pipeline() {
        let track = vec![
            sample_fix("2024-05-01T12:00:00.000Z", 0.0, 0.0),
            sample_fix("2024-05-01T12:00:30.000Z", 0.0, 0.02),
        ];
        let xml = convert_to_gpx(&track, ProcessingConfig::default());
        assert_eq!(xml.matches("<trkpt ").count(), 4);
    }
}
