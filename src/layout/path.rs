use crate::svg::fmt_num;

/// Accumulates SVG path commands; renders as `"M 0 5 H 20 Q ..."`.
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    commands: Vec<String>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, cmd: char, args: &[f64]) -> &mut Self {
        let mut out = String::with_capacity(2 + args.len() * 6);
        out.push(cmd);
        for arg in args {
            out.push(' ');
            out.push_str(&fmt_num(*arg));
        }
        self.commands.push(out);
        self
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.push('M', &[x, y])
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.push('L', &[x, y])
    }

    pub fn horizontal_to(&mut self, x: f64) -> &mut Self {
        self.push('H', &[x])
    }

    pub fn vertical_to(&mut self, y: f64) -> &mut Self {
        self.push('V', &[y])
    }

    pub fn quadratic_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) -> &mut Self {
        self.push('Q', &[cx, cy, x, y])
    }

    pub fn cubic_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) -> &mut Self {
        self.push('C', &[c1x, c1y, c2x, c2y, x, y])
    }

    #[allow(clippy::too_many_arguments)]
    pub fn arc_to(
        &mut self,
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    ) -> &mut Self {
        let large_arc = if large_arc { 1.0 } else { 0.0 };
        let sweep = if sweep { 1.0 } else { 0.0 };
        self.push('A', &[rx, ry, rotation, large_arc, sweep, x, y])
    }

    pub fn build(&self) -> String {
        self.commands.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_commands_with_spaces() {
        let d = PathBuilder::new()
            .move_to(0.0, 12.5)
            .quadratic_to(10.0, 12.5, 10.0, 2.5)
            .vertical_to(-0.0)
            .horizontal_to(30.0)
            .build();
        assert_eq!(d, "M 0 12.5 Q 10 12.5 10 2.5 V 0 H 30");
    }

    #[test]
    fn arc_flags_are_integers() {
        let d = PathBuilder::new()
            .arc_to(5.0, 5.0, 0.0, false, true, 10.0, 0.0)
            .cubic_to(1.0, 2.0, 3.0, 4.0, 5.0, 6.0)
            .line_to(0.1, 0.2)
            .build();
        assert_eq!(d, "A 5 5 0 0 1 10 0 C 1 2 3 4 5 6 L 0.1 0.2");
    }
}
