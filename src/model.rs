//! Wire types for the MCP server web API.
//!
//! The server's JSON is treated as an external contract and decoded
//! permissively: any Slice/Station field may be missing or `null`, strings
//! fall back to `""`, numbers to `0`, and `stations` to an empty list.
//! Numbers or bools sent where text is expected are kept as their text form.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One monitored channel as reported by `GET /slices`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slice {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub band: String,
    /// Dial frequency in Hz.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub dial_frequency: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stations: Vec<Station>,
}

impl Slice {
    /// True when either `id` or `name` names this channel.
    pub fn is_channel(&self, channel: &str) -> bool {
        self.id == channel || self.name == channel
    }

    /// Display label: `id`, else `name`, else `?`.
    pub fn channel(&self) -> &str {
        if !self.id.is_empty() {
            &self.id
        } else if !self.name.is_empty() {
            &self.name
        } else {
            "?"
        }
    }

    pub fn dial_mhz(&self) -> f64 {
        self.dial_frequency / 1e6
    }
}

/// A decoded transmission seen on a slice.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    #[serde(default, deserialize_with = "lenient_string")]
    pub callsign: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub grid: String,
    /// Signal-to-noise ratio in dB.
    #[serde(default, deserialize_with = "lenient_i32")]
    pub snr: i32,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub last_seen: String,
}

/// A station that passed the CQ/SNR filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub callsign: String,
    pub grid: String,
    pub snr: i32,
    pub message: String,
    pub time: String,
}

impl From<&Station> for Candidate {
    fn from(s: &Station) -> Self {
        Candidate {
            callsign: s.callsign.clone(),
            grid: s.grid.clone(),
            snr: s.snr,
            message: s.message.clone(),
            time: s.last_seen.clone(),
        }
    }
}

/// Body of `POST /qso/execute`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QsoRequest {
    pub instance_id: String,
    pub target_callsign: String,
    pub my_callsign: String,
    pub my_grid: String,
}

/// Server-side instance routing key for a channel, e.g. `Slice-C`.
pub fn instance_id_for(channel: &str) -> String {
    format!("Slice-{}", channel)
}

fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

fn number_of(v: Option<Value>) -> f64 {
    match v {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(number_of(Option::<Value>::deserialize(d)?))
}

fn lenient_i32<'de, D: Deserializer<'de>>(d: D) -> Result<i32, D::Error> {
    // `as` truncates toward zero and saturates at the i32 bounds
    Ok(number_of(Option::<Value>::deserialize(d)?) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_slice_decodes() {
        let v = json!({
            "id": "C",
            "band": "20m",
            "dialFrequency": 14074000,
            "stations": [
                {"callsign": "W1AW", "grid": "FN31", "snr": -15, "message": "CQ W1AW FN31", "lastSeen": "2024-05-01T12:00:15Z"}
            ]
        });
        let s: Slice = serde_json::from_value(v).unwrap();
        assert_eq!(s.channel(), "C");
        assert_eq!(s.band, "20m");
        assert!((s.dial_mhz() - 14.074).abs() < 1e-9);
        assert_eq!(s.stations.len(), 1);
        assert_eq!(s.stations[0].snr, -15);
        assert_eq!(s.stations[0].last_seen, "2024-05-01T12:00:15Z");
    }

    #[test]
    fn missing_and_null_fields_default() {
        let v = json!([
            {"name": "D", "stations": null, "dialFrequency": null},
            {"stations": [{"message": "CQ DX", "snr": null, "callsign": null}]}
        ]);
        let slices: Vec<Slice> = serde_json::from_value(v).unwrap();
        assert_eq!(slices[0].channel(), "D");
        assert!(slices[0].stations.is_empty());
        assert_eq!(slices[0].dial_frequency, 0.0);
        assert_eq!(slices[1].channel(), "?");
        let st = &slices[1].stations[0];
        assert_eq!(st.callsign, "");
        assert_eq!(st.grid, "");
        assert_eq!(st.snr, 0);
    }

    #[test]
    fn fractional_and_string_snr_are_tolerated() {
        let st: Station = serde_json::from_value(json!({"snr": -12.7})).unwrap();
        assert_eq!(st.snr, -12);
        let st: Station = serde_json::from_value(json!({"snr": "-8"})).unwrap();
        assert_eq!(st.snr, -8);
        let st: Station = serde_json::from_value(json!({"snr": "weak"})).unwrap();
        assert_eq!(st.snr, 0);
    }

    #[test]
    fn numeric_ids_and_timestamps_become_text() {
        let v = json!([{
            "id": 3,
            "band": ["20m"],
            "stations": [{"callsign": "W1AW", "snr": -15, "message": "CQ W1AW FN31", "lastSeen": 1714564815000u64, "grid": false}]
        }]);
        let slices: Vec<Slice> = serde_json::from_value(v).unwrap();
        assert_eq!(slices[0].id, "3");
        assert!(slices[0].is_channel("3"));
        assert_eq!(slices[0].band, "");
        let st = &slices[0].stations[0];
        assert_eq!(st.last_seen, "1714564815000");
        assert_eq!(st.grid, "false");
        assert_eq!(Candidate::from(st).time, "1714564815000");
    }

    #[test]
    fn non_array_snapshot_is_rejected() {
        let r = serde_json::from_value::<Vec<Slice>>(json!({"error": "busy"}));
        assert!(r.is_err());
    }

    #[test]
    fn qso_request_uses_camel_case() {
        let req = QsoRequest {
            instance_id: instance_id_for("C"),
            target_callsign: "PD1HPB".into(),
            my_callsign: "HB9BLA".into(),
            my_grid: "JN37VL".into(),
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"instanceId": "Slice-C", "targetCallsign": "PD1HPB", "myCallsign": "HB9BLA", "myGrid": "JN37VL"})
        );
    }
}
