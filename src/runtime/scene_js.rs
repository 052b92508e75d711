//! Phaser scene script embedded in the generated page.
//!
//! Expects `imageAssets`, `audioAssets` and `tuning` to be defined before it
//! runs. Mirrors `game::scene` step for step.

pub(super) const SCENE_JS: &str = r#"
const PROJECTILE_KEY = 'magicProjectile';
const FALLBACK_PROJECTILE_URL = 'https://i.ibb.co/6B9qzRn/magic.png';

const config = {
    type: Phaser.AUTO,
    width: tuning.world_width,
    height: tuning.world_height,
    backgroundColor: '#87ceeb',
    physics: {
        default: 'arcade',
        arcade: { gravity: { y: tuning.gravity_y }, debug: false }
    },
    scene: { preload: preload, create: create, update: update }
};

const game = new Phaser.Game(config);

// Scene state. Keyboard (slot 0) drives players[0].
const session = {
    players: [], enemies: [], projectiles: null,
    keys: null, sounds: {}
};

function preload() {
    for (const [key, data] of Object.entries(imageAssets)) {
        this.load.image(key, data);
    }
    for (const [key, data] of Object.entries(audioAssets)) {
        this.load.audio(key, data);
    }
    if (!imageAssets[PROJECTILE_KEY]) {
        this.load.image(PROJECTILE_KEY, FALLBACK_PROJECTILE_URL);
    }
}

function isPlayer(k) { return k.toLowerCase().startsWith('player'); }
function isEnemy(k) {
    return !['background', 'ground'].some(n => k.includes(n)) && !isPlayer(k);
}

function play(name) {
    const s = session.sounds[name];
    if (s) s.play();
}

// In place: the overlap handler holds a reference to this array.
function defeat(e) {
    const i = session.enemies.indexOf(e);
    if (i >= 0) session.enemies.splice(i, 1);
    e.destroy();
}

function create() {
    const scene = this;
    const names = Object.keys(imageAssets);

    const bgKey = names.find(k => k.toLowerCase().includes('background'));
    if (bgKey) scene.add.image(tuning.world_width / 2, tuning.world_height / 2, bgKey);

    const groundKey = names.find(k => k.toLowerCase().includes('ground'));
    const ground = scene.physics.add.staticGroup();
    if (groundKey) {
        ground.create(tuning.ground_x, tuning.ground_y, groundKey)
            .setScale(tuning.ground_scale).refreshBody();
    }

    names.filter(isPlayer).forEach((key, i) => {
        const x = tuning.player_spawn_x + Math.random() * tuning.spawn_band;
        const p = scene.physics.add.sprite(x, tuning.spawn_y, key);
        p.setBounce(0.2); p.setCollideWorldBounds(true);
        p.health = tuning.player_health;
        p.facing = 'right';
        p.magic = tuning.magic[i % tuning.magic.length];
        p.attackCooldown = 0; p.magicCooldown = 0;
        scene.physics.add.collider(p, ground);
        session.players.push(p);
    });

    names.filter(isEnemy).forEach(key => {
        const x = tuning.enemy_spawn_x + Math.random() * tuning.spawn_band;
        const e = scene.physics.add.sprite(x, tuning.spawn_y, key);
        e.setBounce(0.2); e.setCollideWorldBounds(true);
        e.health = tuning.enemy_health;
        scene.physics.add.collider(e, ground);
        session.enemies.push(e);
    });

    session.projectiles = scene.physics.add.group();
    scene.physics.add.collider(session.projectiles, ground, proj => proj.destroy());
    scene.physics.add.overlap(session.projectiles, session.enemies, (proj, e) => {
        if (!proj.active || !e.active) return;
        e.health -= tuning.magic_damage;
        play('hit');
        proj.destroy();
        if (e.health <= 0) defeat(e);
    });

    session.keys = {
        cursors: scene.input.keyboard.createCursorKeys(),
        attack: scene.input.keyboard.addKey(Phaser.Input.Keyboard.KeyCodes.SPACE),
        magic: scene.input.keyboard.addKey(Phaser.Input.Keyboard.KeyCodes.M)
    };

    for (const name of ['sword', 'hit', 'magic']) {
        if (audioAssets[name]) {
            session.sounds[name] = scene.sound.add(name, { volume: tuning.sound_volume });
        }
    }
    if (audioAssets['bgm']) {
        scene.sound.add('bgm', { loop: true, volume: tuning.sound_volume }).play();
    }
}

function drive(player, keys) {
    const c = keys.cursors;
    if (c.left.isDown) { player.setVelocityX(-tuning.move_speed); player.facing = 'left'; }
    else if (c.right.isDown) { player.setVelocityX(tuning.move_speed); player.facing = 'right'; }
    else player.setVelocityX(0);
    if (c.up.isDown && player.body.touching.down) player.setVelocityY(tuning.jump_velocity);

    if (keys.attack.isDown && player.attackCooldown <= 0) {
        play('sword');
        player.attackCooldown = tuning.attack_cooldown_ms;
        session.enemies.forEach(e => {
            if (Phaser.Math.Distance.Between(player.x, player.y, e.x, e.y) < tuning.melee_radius) {
                e.health -= tuning.melee_damage;
                play('hit');
            }
        });
        session.enemies.filter(e => e.health <= 0).forEach(defeat);
    }

    if (keys.magic.isDown && player.magicCooldown <= 0) {
        player.magicCooldown = tuning.magic_cooldown_ms;
        play('magic');
        const proj = session.projectiles.create(player.x, player.y, PROJECTILE_KEY);
        const m = player.magic;
        proj.setVelocityX(player.facing === 'right' ? m.speed : -m.speed);
        proj.setTint(m.color);
        proj.body.setGravityY(tuning.projectile_gravity_y);
        proj.age = 0;
    }
}

function update(time, delta) {
    if (session.players.length === 0) return;
    session.players.forEach(p => { p.attackCooldown -= delta; p.magicCooldown -= delta; });

    const player = session.players[0];
    drive(player, session.keys);

    session.projectiles.getChildren().slice().forEach(proj => {
        proj.age += delta;
        const outside = proj.x < 0 || proj.x > tuning.world_width
            || proj.y < 0 || proj.y > tuning.world_height;
        if (outside || proj.age > tuning.projectile_lifetime_ms) proj.destroy();
    });

    session.enemies.forEach(e => {
        e.setVelocityX(player.x < e.x ? -tuning.enemy_speed : tuning.enemy_speed);
    });
}
"#;
