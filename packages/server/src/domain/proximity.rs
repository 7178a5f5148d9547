//! Radius search over connected users' last known locations.
//!
//! This module contains pure functions; the registry calls them while
//! holding its lock so that every query sees one consistent snapshot.

use super::{
    entity::ConnectedUser,
    geo::{Coordinate, distance},
    value_object::UserId,
};

/// "Which connected users lie within `radius_m` of `center`, except `exclude`?"
#[derive(Debug, Clone, PartialEq)]
pub struct ProximityQuery {
    pub center: Coordinate,
    pub radius_m: f64,
    pub exclude: UserId,
}

/// One user matched by a [`ProximityQuery`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProximityMatch {
    pub user_id: UserId,
    pub distance_m: f64,
}

/// Scan `users` and return those with a known location inside the radius.
///
/// Linear in the number of users. The result is sorted by distance, then by
/// user id, so callers and tests see a stable order.
pub fn find_within<'a, I>(users: I, query: &ProximityQuery) -> Vec<ProximityMatch>
where
    I: IntoIterator<Item = &'a ConnectedUser>,
{
    let mut matches: Vec<ProximityMatch> = users
        .into_iter()
        .filter(|user| user.user_id != query.exclude)
        .filter_map(|user| {
            let location = user.location?;
            let distance_m = distance(&query.center, &location);
            (distance_m <= query.radius_m).then(|| ProximityMatch {
                user_id: user.user_id.clone(),
                distance_m,
            })
        })
        .collect();

    matches.sort_by(|a, b| {
        a.distance_m
            .total_cmp(&b.distance_m)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConnectionId, Timestamp};
    use tokio::sync::mpsc;

    fn user_at(id: &str, location: Option<(f64, f64)>) -> ConnectedUser {
        let (sender, _receiver) = mpsc::unbounded_channel();
        let mut user = ConnectedUser::new(
            UserId::new(id.to_string()).unwrap(),
            ConnectionId::generate(),
            sender,
            Timestamp::new(0),
        );
        if let Some((lat, lon)) = location {
            user.update_location(Coordinate::new(lat, lon).unwrap(), Timestamp::new(1));
        }
        user
    }

    fn query(lat: f64, lon: f64, radius_m: f64, exclude: &str) -> ProximityQuery {
        ProximityQuery {
            center: Coordinate::new(lat, lon).unwrap(),
            radius_m,
            exclude: UserId::new(exclude.to_string()).unwrap(),
        }
    }

    #[test]
    fn test_find_within_with_no_users() {
        // テスト項目: 接続ユーザーがいない場合、空のリストが返される
        // given (前提条件):
        let users: Vec<ConnectedUser> = vec![];

        // when (操作):
        let result = find_within(&users, &query(37.0, -122.0, 5_000.0, "alice"));

        // then (期待する結果):
        assert!(result.is_empty());
    }

    #[test]
    fn test_find_within_excludes_reporter_even_when_inside_radius() {
        // テスト項目: 除外ユーザーは半径内にいても結果に含まれない
        // given (前提条件):
        let users = vec![
            user_at("alice", Some((37.0, -122.0))),
            user_at("bob", Some((37.0002, -122.0))),
        ];

        // when (操作):
        let result = find_within(&users, &query(37.0, -122.0, 5_000.0, "alice"));

        // then (期待する結果):
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].user_id.as_str(), "bob");
        assert!((result[0].distance_m - 22.24).abs() < 0.01);
    }

    #[test]
    fn test_find_within_skips_users_without_location() {
        // テスト項目: 位置情報を一度も送っていないユーザーは対象外
        // given (前提条件):
        let users = vec![user_at("bob", None), user_at("carol", Some((37.001, -122.0)))];

        // when (操作):
        let result = find_within(&users, &query(37.0, -122.0, 5_000.0, "alice"));

        // then (期待する結果):
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].user_id.as_str(), "carol");
    }

    #[test]
    fn test_find_within_respects_radius_boundary() {
        // テスト項目: 半径ちょうどのユーザーは含まれ、外側のユーザーは含まれない
        // given (前提条件):
        let center = Coordinate::new(37.0, -122.0).unwrap();
        let edge = Coordinate::new(37.0002, -122.0).unwrap();
        let radius = distance(&center, &edge);
        let users = vec![
            user_at("edge", Some((37.0002, -122.0))),
            user_at("outside", Some((37.0003, -122.0))),
        ];

        // when (操作):
        let result = find_within(&users, &query(37.0, -122.0, radius, "alice"));

        // then (期待する結果):
        let ids: Vec<&str> = result.iter().map(|m| m.user_id.as_str()).collect();
        assert_eq!(ids, vec!["edge"]);
    }

    #[test]
    fn test_find_within_sorts_by_distance_then_user_id() {
        // テスト項目: 結果は距離順、同距離はユーザー ID 順に並ぶ
        // given (前提条件):
        let users = vec![
            user_at("far", Some((37.01, -122.0))),
            user_at("zed", Some((37.001, -122.0))),
            user_at("amy", Some((37.001, -122.0))),
        ];

        // when (操作):
        let result = find_within(&users, &query(37.0, -122.0, 5_000.0, "alice"));

        // then (期待する結果):
        let ids: Vec<&str> = result.iter().map(|m| m.user_id.as_str()).collect();
        assert_eq!(ids, vec!["amy", "zed", "far"]);
    }

    #[test]
    fn test_find_within_only_returns_users_inside_radius() {
        // テスト項目: 返されるユーザーは全て distance <= radius を満たす
        // given (前提条件):
        let users: Vec<ConnectedUser> = (0..20)
            .map(|i| user_at(&format!("u{i}"), Some((37.0 + i as f64 * 0.01, -122.0))))
            .collect();
        let q = query(37.0, -122.0, 5_000.0, "u0");

        // when (操作):
        let result = find_within(&users, &q);

        // then (期待する結果):
        assert!(!result.is_empty());
        for m in &result {
            assert!(m.distance_m <= q.radius_m);
            assert_ne!(m.user_id, q.exclude);
        }
        // 0.01 度 ≈ 1.11 km なので u1..u4 だけが 5 km 以内
        assert_eq!(result.len(), 4);
    }
}
