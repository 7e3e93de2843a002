use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::request::{RequestStatus, SongRequest};

/// Derived display counters for one event's request queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestStats {
    pub total: u64,
    pub pending: u64,
    pub completed: u64,
    /// Sum of tips across every request, whatever its status.
    pub total_tips: Decimal,
}

/// Pure function of the request set; recomputed on every fetch rather
/// than maintained incrementally.
pub fn compute_stats(requests: &[SongRequest]) -> RequestStats {
    let mut stats = RequestStats {
        total: requests.len() as u64,
        pending: 0,
        completed: 0,
        total_tips: Decimal::ZERO,
    };

    for request in requests {
        match request.status {
            RequestStatus::Pending => stats.pending += 1,
            RequestStatus::Completed => stats.completed += 1,
            RequestStatus::Playing | RequestStatus::Rejected => {}
        }
        stats.total_tips += request.tip_amount;
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn request(status: RequestStatus, tip: &str) -> SongRequest {
        SongRequest {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            song_name: "Strobe".to_string(),
            artist: "deadmau5".to_string(),
            special_request: None,
            tip_amount: tip.parse().unwrap(),
            status,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_input_yields_zeroes() {
        let stats = compute_stats(&[]);
        assert_eq!(
            stats,
            RequestStats {
                total: 0,
                pending: 0,
                completed: 0,
                total_tips: Decimal::ZERO,
            }
        );
    }

    #[test]
    fn test_mixed_statuses() {
        let requests = vec![
            request(RequestStatus::Pending, "5"),
            request(RequestStatus::Pending, "0"),
            request(RequestStatus::Playing, "2.50"),
            request(RequestStatus::Completed, "10"),
            request(RequestStatus::Rejected, "1"),
        ];

        let stats = compute_stats(&requests);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.completed, 1);
        // Rejected and playing tips still count.
        assert_eq!(stats.total_tips, "18.50".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_tips_invariant_under_reordering() {
        let mut requests = vec![
            request(RequestStatus::Pending, "1.10"),
            request(RequestStatus::Completed, "2.20"),
            request(RequestStatus::Rejected, "3.30"),
        ];

        let forward = compute_stats(&requests);
        requests.reverse();
        let backward = compute_stats(&requests);

        assert_eq!(forward.total_tips, backward.total_tips);
        assert_eq!(forward, backward);
    }
}
