//! Schema text fixtures shared by parser tests.

pub const SHAPES_TWS: &str = r#"
// Polymorphic shapes.
abstract message BaseShape {
  10: string label;
  include 101 RectShape;
  include 102 CircleShape;
  include 103 TriangleShape;
}

message RectShape {
  1: Vector2 position;
  2: Vector2 size;
}

message CircleShape {
  1: Vector2 position;
  2: f32 radius;
}

message TriangleShape {
  1: Vector2 position1;
  2: Vector2 position2;
  3: Vector2 position3;
}

message ShapeContainer {
  1: list<BaseShape> shapes;
  2: CircleShape favourite;
}
"#;
