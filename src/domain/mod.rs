use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Points credited for each kilogram of recycled material
pub const POINTS_PER_KG: f64 = 10.0;

/// Donation submitted by a user
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DonationRequest {
    /// Opaque identifier of the user receiving the points
    ///
    /// An empty identifier is accepted as-is.
    pub user_id: String,
    /// Weight of the donation in kilograms
    ///
    /// This can be negative or fractional.
    pub weight: f64,
}

impl DonationRequest {
    /// Decode a donation from a JSON body
    ///
    /// Decoding is permissive: missing fields (or a `null` body) produce zero values instead of
    /// an error, and a repeated key keeps its last value. Bodies that are not a JSON object, or
    /// whose fields have the wrong type, are rejected.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        let Some(mut body) = serde_json::from_slice::<Option<Map<String, Value>>>(body)? else {
            return Ok(Self::default());
        };

        Ok(Self {
            user_id: take_field(&mut body, "user_id")?,
            weight: take_field(&mut body, "weight")?,
        })
    }

    pub fn points(&self) -> PointsDelta {
        PointsDelta::from_weight(self.weight)
    }
}

/// Difference in points applied to a user's total
///
/// A positive number adds points to the current total. A negative number removes from it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PointsDelta(pub i64);

impl PointsDelta {
    /// Convert a weight in kilograms into points
    ///
    /// The result is truncated toward zero, so `0.33` kg is worth 3 points and `-0.05` kg is
    /// worth nothing. Weights outside the `i64` range saturate.
    pub fn from_weight(weight: f64) -> Self {
        Self((weight * POINTS_PER_KG) as i64)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Remove a field from a decoded object, treating a missing or `null` field as the zero value
fn take_field<T>(body: &mut Map<String, Value>, key: &str) -> Result<T, serde_json::Error>
where
    T: DeserializeOwned + Default,
{
    let value = body
        .remove(key)
        .map(serde_json::from_value::<Option<T>>)
        .transpose()?;

    Ok(value.flatten().unwrap_or_default())
}

impl std::fmt::Display for PointsDelta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;
    use speculoos::prelude::*;

    #[rstest]
    #[case(2.5, 25)]
    #[case(0.33, 3)]
    #[case(0.0, 0)]
    #[case(2.0, 20)]
    #[case(1.99, 19)]
    #[case(-1.0, -10)]
    #[case(-0.05, 0)]
    #[case(-2.79, -27)]
    fn test_from_weight(#[case] weight: f64, #[case] expected: i64) {
        // GIVEN a weight in kilograms

        // WHEN converting it to points
        let res = PointsDelta::from_weight(weight);

        // THEN it is truncated toward zero
        assert_that!(res).is_equal_to(PointsDelta(expected));
    }

    #[test]
    fn test_from_weight_saturates() {
        assert_that!(PointsDelta::from_weight(f64::MAX)).is_equal_to(PointsDelta(i64::MAX));
        assert_that!(PointsDelta::from_weight(f64::MIN)).is_equal_to(PointsDelta(i64::MIN));
    }

    #[test]
    fn test_from_json() {
        let res = DonationRequest::from_json(br#"{"user_id": "u1", "weight": 2.5}"#);

        assert_that!(res).is_ok().is_equal_to(DonationRequest {
            user_id: "u1".to_string(),
            weight: 2.5,
        });
    }

    /// Missing or null fields are not an error, they decode to zero values
    #[rstest]
    #[case(br#"{"user_id": "u1"}"#.as_slice(), "u1", 0.0)]
    #[case(br#"{"user_id": "u1", "weight": null}"#.as_slice(), "u1", 0.0)]
    #[case(br#"{"weight": 1.5}"#.as_slice(), "", 1.5)]
    #[case(br#"{}"#.as_slice(), "", 0.0)]
    #[case(b"null".as_slice(), "", 0.0)]
    #[case(br#"{"user_id": "u1", "weight": 3, "extra": true}"#.as_slice(), "u1", 3.0)]
    #[case(br#"{"user_id": "u1", "weight": 1, "weight": 2}"#.as_slice(), "u1", 2.0)]
    #[case(br#"{"user_id": "u0", "weight": 1, "user_id": "u1"}"#.as_slice(), "u1", 1.0)]
    fn test_from_json_permissive(
        #[case] body: &[u8],
        #[case] user_id: &str,
        #[case] weight: f64,
    ) {
        // GIVEN an incomplete body

        // WHEN decoding it
        let res = DonationRequest::from_json(body);

        // THEN missing fields are zero-valued
        assert_that!(res).is_ok().is_equal_to(DonationRequest {
            user_id: user_id.to_string(),
            weight,
        });
    }

    #[test]
    fn test_missing_weight_is_zero_points() {
        let res = DonationRequest::from_json(br#"{"user_id": "u1"}"#).map(|req| req.points());

        assert_that!(res).is_ok().is_equal_to(PointsDelta(0));
    }

    #[rstest]
    #[case(b"not json".as_slice())]
    #[case(b"".as_slice())]
    #[case(br#"{"user_id": "u1", "weight": "heavy"}"#.as_slice())]
    #[case(br#"{"user_id": 42, "weight": 1.0}"#.as_slice())]
    #[case(br#"[1, 2]"#.as_slice())]
    #[case(br#"["u1", 2.5]"#.as_slice())]
    #[case(b"[]".as_slice())]
    #[case(b"2.5".as_slice())]
    #[case(br#""u1""#.as_slice())]
    #[case(br#"{"user_id": "u1""#.as_slice())]
    fn test_from_json_malformed(#[case] body: &[u8]) {
        let res = DonationRequest::from_json(body);

        assert_that!(res).is_err();
    }
}
