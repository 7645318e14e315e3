use invader_shop::arena::Arena;
use invader_shop::entities::*;
use invader_shop::geometry::Rect;

fn rect(x: i32, y: i32) -> Rect {
    Rect::new(x, y, 10, 10)
}

#[test]
fn entity_clone_and_eq() {
    assert_eq!(Role::Enemy, Role::Enemy);
    assert_ne!(Role::Bullet, Role::EnemyBullet);
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::ShopOpen, GameStatus::GameOver);

    let mut arena = Arena::new();
    let id = arena.spawn(Role::PowerUp, rect(1, 2), 1, 0);
    let e = arena.get(id).unwrap();
    assert_eq!(e.clone(), *e);
}

#[test]
fn spawn_hands_out_unique_ids() {
    let mut arena = Arena::new();
    let a = arena.spawn(Role::Enemy, rect(0, 0), 1, 0);
    let b = arena.spawn(Role::Enemy, rect(0, 0), 1, 0);
    arena.remove(a);
    let c = arena.spawn(Role::Bullet, rect(0, 0), -10, 0);
    assert!(a < b && b < c);
}

#[test]
fn role_views_partition_all_sprites() {
    let mut arena = Arena::new();
    arena.spawn(Role::Enemy, rect(0, 0), 1, 0);
    arena.spawn(Role::Bullet, rect(0, 0), -10, 0);
    arena.spawn(Role::Enemy, rect(0, 0), 1, 0);
    arena.spawn(Role::PowerUp, rect(0, 0), 1, 0);

    let roles = [Role::Bullet, Role::Enemy, Role::EnemyBullet, Role::PowerUp];
    let total: usize = roles.iter().map(|&r| arena.count(r)).sum();
    assert_eq!(total, arena.len());
    assert_eq!(arena.count(Role::Enemy), 2);
    assert_eq!(arena.count(Role::EnemyBullet), 0);
    for role in roles {
        for e in arena.with_role(role) {
            assert!(arena.iter().any(|all| all.id == e.id));
        }
    }
}

#[test]
fn remove_takes_entity_out_of_every_view() {
    let mut arena = Arena::new();
    let id = arena.spawn(Role::EnemyBullet, rect(0, 0), 5, 0);
    let removed = arena.remove(id).unwrap();
    assert_eq!(removed.role, Role::EnemyBullet);
    assert!(arena.is_empty());
    assert_eq!(arena.count(Role::EnemyBullet), 0);
    assert!(arena.remove(id).is_none());
}

#[test]
fn remove_overlapping_only_touches_one_role() {
    let mut arena = Arena::new();
    arena.spawn(Role::Enemy, rect(0, 0), 1, 0);
    arena.spawn(Role::Enemy, rect(100, 100), 1, 0);
    let bullet = arena.spawn(Role::Bullet, rect(0, 0), -10, 0);

    let removed = arena.remove_overlapping(Role::Enemy, &Rect::new(5, 5, 10, 10));
    assert_eq!(removed, 1);
    assert_eq!(arena.count(Role::Enemy), 1);
    assert!(arena.contains(bullet));
}

#[test]
fn arena_clone_is_independent() {
    let mut original = Arena::new();
    original.spawn(Role::Enemy, rect(20, 16), 1, 0);
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    for e in cloned.iter_mut() {
        e.rect.x = 99;
    }
    cloned.spawn(Role::Bullet, rect(5, 5), -10, 0);

    assert_eq!(original.len(), 1);
    assert_eq!(original.iter().next().unwrap().rect.x, 20);
}
